//! Gasoline versus electric car running-cost comparison.
//!
//! Inputs are collected with [`SavingsCalculatorBuilder`], then the
//! calculator computes the gasoline cost, the electric cost and the annual
//! savings in that order before results can be displayed, exported as CSV
//! or charted.

use anyhow::Error;

pub mod builder;
pub mod calculator;
pub mod error;
pub mod report;

pub use builder::SavingsCalculatorBuilder;
pub use calculator::{
    CalculationState, ElectricCarSavingsCalculator, Parameters, SavingsCalculator,
};
pub use error::CalculatorError;
pub use report::{
    BarChart, ChartRenderer, CsvFileWriter, MetricRow, TabularWriter, TextBarChart,
    DEFAULT_REPORT_FILE,
};

pub type Result<T> = std::result::Result<T, Error>;
