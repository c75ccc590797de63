use crate::{
    calculator::{ElectricCarSavingsCalculator, Parameters},
    error::CalculatorError,
};

/// Collects the comparison inputs one at a time before a calculator exists.
///
/// Every setter consumes and returns the builder, so a full configuration
/// reads as a single chain ending in [`build`](Self::build).
#[derive(Debug, Default, Clone)]
pub struct SavingsCalculatorBuilder {
    calculator_type: Option<String>,
    miles_per_year: Option<f64>,
    mpg: Option<f64>,
    gas_price: Option<f64>,
    miles_per_kwh: Option<f64>,
    electric_price: Option<f64>,
    gas_maintenance: Option<f64>,
    electric_maintenance: Option<f64>,
    gas_car_price: Option<f64>,
    electric_car_price: Option<f64>,
    co2_per_gallon: Option<f64>,
    co2_per_kwh: Option<f64>,
}

impl SavingsCalculatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calculator_type(mut self, calculator_type: impl Into<String>) -> Self {
        self.calculator_type = Some(calculator_type.into());
        self
    }

    pub fn miles_per_year(mut self, miles_per_year: f64) -> Self {
        self.miles_per_year = Some(miles_per_year);
        self
    }

    pub fn mpg(mut self, mpg: f64) -> Self {
        self.mpg = Some(mpg);
        self
    }

    pub fn gas_price(mut self, gas_price: f64) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn miles_per_kwh(mut self, miles_per_kwh: f64) -> Self {
        self.miles_per_kwh = Some(miles_per_kwh);
        self
    }

    pub fn electric_price(mut self, electric_price: f64) -> Self {
        self.electric_price = Some(electric_price);
        self
    }

    pub fn gas_maintenance(mut self, gas_maintenance: f64) -> Self {
        self.gas_maintenance = Some(gas_maintenance);
        self
    }

    pub fn electric_maintenance(mut self, electric_maintenance: f64) -> Self {
        self.electric_maintenance = Some(electric_maintenance);
        self
    }

    pub fn gas_car_price(mut self, gas_car_price: f64) -> Self {
        self.gas_car_price = Some(gas_car_price);
        self
    }

    pub fn electric_car_price(mut self, electric_car_price: f64) -> Self {
        self.electric_car_price = Some(electric_car_price);
        self
    }

    pub fn co2_per_gallon(mut self, co2_per_gallon: f64) -> Self {
        self.co2_per_gallon = Some(co2_per_gallon);
        self
    }

    pub fn co2_per_kwh(mut self, co2_per_kwh: f64) -> Self {
        self.co2_per_kwh = Some(co2_per_kwh);
        self
    }

    fn missing_parameters(&self) -> Vec<&'static str> {
        [
            ("calculator_type", self.calculator_type.is_some()),
            ("miles_per_year", self.miles_per_year.is_some()),
            ("mpg", self.mpg.is_some()),
            ("gas_price", self.gas_price.is_some()),
            ("miles_per_kwh", self.miles_per_kwh.is_some()),
            ("electric_price", self.electric_price.is_some()),
            ("gas_maintenance", self.gas_maintenance.is_some()),
            ("electric_maintenance", self.electric_maintenance.is_some()),
            ("gas_car_price", self.gas_car_price.is_some()),
            ("electric_car_price", self.electric_car_price.is_some()),
            ("co2_per_gallon", self.co2_per_gallon.is_some()),
            ("co2_per_kwh", self.co2_per_kwh.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| (!set).then_some(name))
        .collect()
    }

    /// Freezes the collected inputs into a calculator with no derived state.
    ///
    /// Fails with [`CalculatorError::Configuration`] listing every unset
    /// parameter; nothing is constructed in that case.
    pub fn build(self) -> Result<ElectricCarSavingsCalculator, CalculatorError> {
        let missing = self.missing_parameters();
        let (
            Some(calculator_type),
            Some(miles_per_year),
            Some(mpg),
            Some(gas_price),
            Some(miles_per_kwh),
            Some(electric_price),
            Some(gas_maintenance),
            Some(electric_maintenance),
            Some(gas_car_price),
            Some(electric_car_price),
            Some(co2_per_gallon),
            Some(co2_per_kwh),
        ) = (
            self.calculator_type,
            self.miles_per_year,
            self.mpg,
            self.gas_price,
            self.miles_per_kwh,
            self.electric_price,
            self.gas_maintenance,
            self.electric_maintenance,
            self.gas_car_price,
            self.electric_car_price,
            self.co2_per_gallon,
            self.co2_per_kwh,
        )
        else {
            return Err(CalculatorError::Configuration { missing });
        };

        Ok(ElectricCarSavingsCalculator::new(Parameters {
            calculator_type,
            miles_per_year,
            mpg,
            gas_price,
            miles_per_kwh,
            electric_price,
            gas_maintenance,
            electric_maintenance,
            gas_car_price,
            electric_car_price,
            co2_per_gallon,
            co2_per_kwh,
        }))
    }
}
