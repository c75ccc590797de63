use std::{
    io::{self, Write},
    path::Path,
};

use crate::{
    builder::SavingsCalculatorBuilder,
    error::CalculatorError,
    report::{
        format_currency, Bar, BarChart, ChartRenderer, CsvFileWriter, MetricRow, TabularWriter,
    },
    Result,
};

const SAVINGS_NOT_COMPUTED: &str = "savings must be calculated before results can be used";

// Generic methods keep this trait out of `dyn` use; dispatch statically.
pub trait SavingsCalculator {
    fn compute_savings(&mut self) -> std::result::Result<&mut Self, CalculatorError>;
    fn compute_payback_period(&self) -> std::result::Result<f64, CalculatorError>;
    fn compute_co2_reduction(&self) -> std::result::Result<f64, CalculatorError>;
    fn display_results(&self, detailed: bool) -> Result<()>;
    fn export_results<P: AsRef<Path>>(&self, destination: P) -> Result<()>;
    fn plot_costs<R: ChartRenderer>(&self, renderer: &mut R) -> Result<()>;
}

/// Inputs frozen into a calculator by [`SavingsCalculatorBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub calculator_type: String,
    pub miles_per_year: f64,
    pub mpg: f64,
    pub gas_price: f64,
    pub miles_per_kwh: f64,
    pub electric_price: f64,
    pub gas_maintenance: f64,
    pub electric_maintenance: f64,
    pub gas_car_price: f64,
    pub electric_car_price: f64,
    pub co2_per_gallon: f64,
    pub co2_per_kwh: f64,
}

impl Parameters {
    fn numeric(&self) -> [(&'static str, f64); 11] {
        [
            ("miles_per_year", self.miles_per_year),
            ("mpg", self.mpg),
            ("gas_price", self.gas_price),
            ("miles_per_kwh", self.miles_per_kwh),
            ("electric_price", self.electric_price),
            ("gas_maintenance", self.gas_maintenance),
            ("electric_maintenance", self.electric_maintenance),
            ("gas_car_price", self.gas_car_price),
            ("electric_car_price", self.electric_car_price),
            ("co2_per_gallon", self.co2_per_gallon),
            ("co2_per_kwh", self.co2_per_kwh),
        ]
    }

    /// Every value finite, both efficiencies strictly positive, nothing negative.
    pub fn validate(&self) -> std::result::Result<(), CalculatorError> {
        let numeric = self.numeric();
        if let Some(&(name, _)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CalculatorError::validation(name, "must be a finite number"));
        }
        if self.mpg <= 0. {
            return Err(CalculatorError::validation("mpg", "must be greater than zero"));
        }
        if self.miles_per_kwh <= 0. {
            return Err(CalculatorError::validation(
                "miles_per_kwh",
                "must be greater than zero",
            ));
        }
        if let Some(&(name, _)) = numeric.iter().find(|(_, v)| *v < 0.) {
            return Err(CalculatorError::validation(name, "must not be negative"));
        }
        Ok(())
    }

    pub fn gallons_per_year(&self) -> f64 {
        self.miles_per_year / self.mpg
    }

    pub fn kwh_per_year(&self) -> f64 {
        self.miles_per_year / self.miles_per_kwh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationState {
    /// Neither cost, or only one of them, has been computed.
    Unvalidated,
    CostsComputed,
    SavingsComputed,
}

struct Summary {
    gas_cost: f64,
    electric_cost: f64,
    savings: f64,
    payback: f64,
    co2_reduction: f64,
}

/// Derived costs are cached in the order gasoline cost, electric cost,
/// savings. Payback period and CO2 reduction are recomputed on each call.
#[derive(Debug, Clone)]
pub struct ElectricCarSavingsCalculator {
    parameters: Parameters,
    gas_annual_cost: Option<f64>,
    electric_annual_cost: Option<f64>,
    annual_savings: Option<f64>,
}

impl ElectricCarSavingsCalculator {
    pub(crate) fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            gas_annual_cost: None,
            electric_annual_cost: None,
            annual_savings: None,
        }
    }

    pub fn builder() -> SavingsCalculatorBuilder {
        SavingsCalculatorBuilder::new()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn gas_annual_cost(&self) -> Option<f64> {
        self.gas_annual_cost
    }

    pub fn electric_annual_cost(&self) -> Option<f64> {
        self.electric_annual_cost
    }

    pub fn annual_savings(&self) -> Option<f64> {
        self.annual_savings
    }

    pub fn state(&self) -> CalculationState {
        match (
            self.gas_annual_cost,
            self.electric_annual_cost,
            self.annual_savings,
        ) {
            (_, _, Some(_)) => CalculationState::SavingsComputed,
            (Some(_), Some(_), None) => CalculationState::CostsComputed,
            _ => CalculationState::Unvalidated,
        }
    }

    pub fn compute_gasoline_cost(&mut self) -> std::result::Result<&mut Self, CalculatorError> {
        self.parameters.validate()?;
        let cost = finite(
            self.parameters.gallons_per_year() * self.parameters.gas_price,
            "mpg",
        )?;
        self.gas_annual_cost = Some(cost);
        Ok(self)
    }

    pub fn compute_electric_cost(&mut self) -> std::result::Result<&mut Self, CalculatorError> {
        self.parameters.validate()?;
        let cost = finite(
            self.parameters.kwh_per_year() * self.parameters.electric_price,
            "miles_per_kwh",
        )?;
        self.electric_annual_cost = Some(cost);
        Ok(self)
    }

    /// Annual CO2 emitted by the gasoline car, in kg.
    pub fn gasoline_emissions(&self) -> std::result::Result<f64, CalculatorError> {
        self.parameters.validate()?;
        finite(
            self.parameters.gallons_per_year() * self.parameters.co2_per_gallon,
            "mpg",
        )
    }

    /// Annual CO2 attributable to charging the electric car, in kg.
    pub fn electric_emissions(&self) -> std::result::Result<f64, CalculatorError> {
        self.parameters.validate()?;
        finite(
            self.parameters.kwh_per_year() * self.parameters.co2_per_kwh,
            "miles_per_kwh",
        )
    }

    fn summary(&self) -> std::result::Result<Summary, CalculatorError> {
        self.parameters.validate()?;
        let (Some(gas_cost), Some(electric_cost), Some(savings)) = (
            self.gas_annual_cost,
            self.electric_annual_cost,
            self.annual_savings,
        ) else {
            return Err(CalculatorError::State(SAVINGS_NOT_COMPUTED));
        };
        Ok(Summary {
            gas_cost,
            electric_cost,
            savings,
            payback: self.compute_payback_period()?,
            co2_reduction: self.compute_co2_reduction()?,
        })
    }

    /// Formats the results to `out`; [`SavingsCalculator::display_results`]
    /// sends the same text to stdout.
    pub fn write_results<W: Write>(&self, mut out: W, detailed: bool) -> Result<()> {
        let summary = self.summary()?;
        writeln!(out)?;
        if detailed {
            writeln!(
                out,
                "Annual cost for gasoline car: {}",
                format_currency(summary.gas_cost)
            )?;
            writeln!(
                out,
                "Annual cost for electric car: {}",
                format_currency(summary.electric_cost)
            )?;
            writeln!(
                out,
                "Annual savings (including maintenance): {}",
                format_currency(summary.savings)
            )?;
            writeln!(
                out,
                "Payback period (years) for the electric car: {:.2} years",
                summary.payback
            )?;
            writeln!(
                out,
                "Annual CO2 reduction by switching to electric car: {:.2} kg",
                summary.co2_reduction
            )?;
        } else {
            writeln!(out, "Annual savings: {}", format_currency(summary.savings))?;
            writeln!(out, "Payback period: {:.2} years", summary.payback)?;
            writeln!(out, "CO2 reduction: {:.2} kg", summary.co2_reduction)?;
        }
        Ok(())
    }

    /// The five report rows, in the order downstream consumers expect.
    pub fn report_rows(&self) -> std::result::Result<Vec<MetricRow>, CalculatorError> {
        let summary = self.summary()?;
        Ok(vec![
            MetricRow::currency("Annual Gasoline Cost", summary.gas_cost),
            MetricRow::currency("Annual Electric Cost", summary.electric_cost),
            MetricRow::currency("Annual Savings", summary.savings),
            MetricRow::number("Payback Period (years)", summary.payback),
            MetricRow::number("CO2 Reduction (kg)", summary.co2_reduction),
        ])
    }

    pub fn export_results_with<T: TabularWriter, P: AsRef<Path>>(
        &self,
        writer: &mut T,
        destination: P,
    ) -> Result<()> {
        let rows = self.report_rows()?;
        writer.write_table(destination.as_ref(), &rows)
    }

    pub fn cost_chart(&self) -> std::result::Result<BarChart, CalculatorError> {
        let summary = self.summary()?;
        Ok(BarChart {
            title: "Annual Costs Comparison",
            y_label: "Cost ($)",
            bars: vec![
                Bar {
                    label: "Gasoline Cost",
                    value: summary.gas_cost,
                    color: "blue",
                },
                Bar {
                    label: "Electric Cost",
                    value: summary.electric_cost,
                    color: "green",
                },
                Bar {
                    label: "Savings",
                    value: summary.savings,
                    color: "orange",
                },
            ],
        })
    }

    pub fn co2_chart(&self) -> std::result::Result<BarChart, CalculatorError> {
        Ok(BarChart {
            title: "CO2 Emissions Comparison",
            y_label: "CO2 (kg)",
            bars: vec![
                Bar {
                    label: "Gasoline CO2",
                    value: self.gasoline_emissions()?,
                    color: "red",
                },
                Bar {
                    label: "Electric CO2",
                    value: self.electric_emissions()?,
                    color: "green",
                },
                Bar {
                    label: "Reduction",
                    value: self.compute_co2_reduction()?,
                    color: "blue",
                },
            ],
        })
    }

    pub fn plot_co2_reduction<R: ChartRenderer>(&self, renderer: &mut R) -> Result<()> {
        renderer.render(&self.co2_chart()?)
    }
}

// Finite inputs can still overflow, e.g. a subnormal efficiency.
fn finite(value: f64, parameter: &'static str) -> std::result::Result<f64, CalculatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculatorError::validation(
            parameter,
            "produces a non-finite result",
        ))
    }
}

impl SavingsCalculator for ElectricCarSavingsCalculator {
    fn compute_savings(&mut self) -> std::result::Result<&mut Self, CalculatorError> {
        let (Some(gas_cost), Some(electric_cost)) =
            (self.gas_annual_cost, self.electric_annual_cost)
        else {
            return Err(CalculatorError::State(
                "costs must be calculated before savings",
            ));
        };
        let maintenance_savings =
            self.parameters.gas_maintenance - self.parameters.electric_maintenance;
        self.annual_savings = Some((gas_cost - electric_cost) + maintenance_savings);
        Ok(self)
    }

    /// Years until the savings offset the price difference.
    ///
    /// Zero savings never pay back and yield `f64::INFINITY`. A negative
    /// result is returned as is.
    fn compute_payback_period(&self) -> std::result::Result<f64, CalculatorError> {
        let savings = self
            .annual_savings
            .ok_or(CalculatorError::State(SAVINGS_NOT_COMPUTED))?;
        if savings == 0. {
            return Ok(f64::INFINITY);
        }
        let price_difference = self.parameters.gas_car_price - self.parameters.electric_car_price;
        Ok(price_difference / savings)
    }

    fn compute_co2_reduction(&self) -> std::result::Result<f64, CalculatorError> {
        Ok(self.gasoline_emissions()? - self.electric_emissions()?)
    }

    fn display_results(&self, detailed: bool) -> Result<()> {
        self.write_results(io::stdout().lock(), detailed)
    }

    fn export_results<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        self.export_results_with(&mut CsvFileWriter, destination)
    }

    fn plot_costs<R: ChartRenderer>(&self, renderer: &mut R) -> Result<()> {
        renderer.render(&self.cost_chart()?)
    }
}
