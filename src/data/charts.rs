//! Trend charts fed from the backend's metric history.
//!
//! Charts hold only the most recently fetched series. Every apply replaces
//! the label axis and every dataset wholesale, so dataset lengths always
//! equal the series length.

use crate::api::{HistoryPoint, Metrics};

/// The four trend charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Oxygen,
    Occupancy,
    Staff,
    Stock,
}

impl ChartKind {
    /// All charts in display order.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Oxygen,
        ChartKind::Occupancy,
        ChartKind::Staff,
        ChartKind::Stock,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Oxygen => "Oxygen",
            ChartKind::Occupancy => "Occupancy",
            ChartKind::Staff => "Staff vs Inflow",
            ChartKind::Stock => "Stock Levels",
        }
    }

    pub fn style(&self) -> ChartStyle {
        match self {
            ChartKind::Staff => ChartStyle::Bar,
            _ => ChartStyle::Line,
        }
    }

    /// Percentage charts are pinned to a 0-100 axis.
    pub fn fixed_max(&self) -> Option<f64> {
        match self {
            ChartKind::Oxygen | ChartKind::Occupancy => Some(100.0),
            ChartKind::Staff | ChartKind::Stock => None,
        }
    }

    fn series(&self) -> &'static [Series] {
        match self {
            ChartKind::Oxygen => &[Series::OxygenLevel],
            ChartKind::Occupancy => &[Series::BedOccupancy, Series::IcuOccupancy],
            ChartKind::Staff => &[Series::StaffAvailable, Series::PatientInflow],
            ChartKind::Stock => &[Series::PharmacyStock, Series::BloodStock],
        }
    }
}

/// How a chart draws its datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    Bar,
}

/// A metric plotted as one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    OxygenLevel,
    BedOccupancy,
    IcuOccupancy,
    StaffAvailable,
    PatientInflow,
    PharmacyStock,
    BloodStock,
}

impl Series {
    pub fn label(&self) -> &'static str {
        match self {
            Series::OxygenLevel => "Oxygen Level (%)",
            Series::BedOccupancy => "Bed Occupancy (%)",
            Series::IcuOccupancy => "ICU Occupancy (%)",
            Series::StaffAvailable => "Staff Available",
            Series::PatientInflow => "Patient Inflow",
            Series::PharmacyStock => "Pharmacy Stock",
            Series::BloodStock => "Blood Stock",
        }
    }

    pub fn read(&self, m: &Metrics) -> f64 {
        match self {
            Series::OxygenLevel => m.oxygen_level,
            Series::BedOccupancy => m.bed_occupancy,
            Series::IcuOccupancy => m.icu_occupancy,
            Series::StaffAvailable => m.staff_available,
            Series::PatientInflow => m.patient_inflow,
            Series::PharmacyStock => m.pharmacy_stock,
            Series::BloodStock => m.blood_stock,
        }
    }
}

/// One plotted line (or bar group).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub series: Series,
    pub points: Vec<f64>,
}

/// A chart: shared label axis plus its datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl Chart {
    fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            datasets: kind
                .series()
                .iter()
                .map(|&series| Dataset {
                    series,
                    points: Vec::new(),
                })
                .collect(),
        }
    }

    fn replace(&mut self, history: &[HistoryPoint]) {
        self.labels = history.iter().map(|p| p.timestamp.clone()).collect();
        for dataset in &mut self.datasets {
            let series = dataset.series;
            dataset.points = history.iter().map(|p| series.read(&p.metrics)).collect();
        }
    }

    /// Number of points on the label axis.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Y-axis bounds, starting at zero.
    pub fn y_bounds(&self) -> [f64; 2] {
        let max = self.kind.fixed_max().unwrap_or_else(|| {
            self.datasets
                .iter()
                .flat_map(|d| d.points.iter().copied())
                .fold(0.0_f64, f64::max)
                .max(1.0)
        });
        [0.0, max]
    }
}

/// Owns every trend chart.
///
/// Constructed once at startup and handed to the history poller; nothing
/// else writes to the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartManager {
    charts: Vec<Chart>,
}

impl Default for ChartManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartManager {
    pub fn new() -> Self {
        Self {
            charts: ChartKind::ALL.iter().map(|&kind| Chart::new(kind)).collect(),
        }
    }

    /// Replace every chart's labels and datasets with `history`.
    pub fn apply_history(&mut self, history: &[HistoryPoint]) {
        for chart in &mut self.charts {
            chart.replace(history);
        }
    }

    pub fn chart(&self, kind: ChartKind) -> &Chart {
        // charts are built in ChartKind::ALL order, which is declaration order
        &self.charts[kind as usize]
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Length of the series currently plotted.
    pub fn series_len(&self) -> usize {
        self.charts.first().map(Chart::len).unwrap_or(0)
    }
}
