use std::collections::VecDeque;

use serde::Serialize;

use crate::signal_processing::DisplayValues;

/// One plotted point
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: f32,
    pub value: f32,
}

/// Fixed-capacity sliding window of chart points for one axis
///
/// Points are kept in insertion order. Once full, every push evicts exactly
/// the oldest point, so the length never exceeds the capacity.
#[derive(Debug, Clone)]
pub struct ChartWindow {
    points: VecDeque<ChartPoint>,
    capacity: usize,
}

impl ChartWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest one first when full
    pub fn push(&mut self, time: f32, value: f32) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(ChartPoint { time, value });
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Copy of the points, oldest to newest
    pub fn snapshot(&self) -> Vec<ChartPoint> {
        self.points.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The three per-axis windows, always pushed together
#[derive(Debug, Clone)]
pub struct AxisCharts {
    windows: [ChartWindow; 3],
}

impl AxisCharts {
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: [
                ChartWindow::new(capacity),
                ChartWindow::new(capacity),
                ChartWindow::new(capacity),
            ],
        }
    }

    /// Push one value to each window, keeping their lengths equal
    pub fn push(&mut self, time: f32, values: DisplayValues) {
        self.windows[0].push(time, values.v1);
        self.windows[1].push(time, values.v2);
        self.windows[2].push(time, values.v3);
    }

    pub fn clear(&mut self) {
        for window in &mut self.windows {
            window.clear();
        }
    }

    pub fn window(&self, axis: usize) -> Option<&ChartWindow> {
        self.windows.get(axis)
    }

    pub fn snapshot(&self) -> [Vec<ChartPoint>; 3] {
        [
            self.windows[0].snapshot(),
            self.windows[1].snapshot(),
            self.windows[2].snapshot(),
        ]
    }

    pub fn len(&self) -> usize {
        self.windows[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows[0].is_empty()
    }
}
