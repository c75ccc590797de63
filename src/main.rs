use std::path::PathBuf;

use clap::Parser;

use ev_savings::{
    ElectricCarSavingsCalculator, Result, SavingsCalculator, TextBarChart, DEFAULT_REPORT_FILE,
};

/// Compare the yearly running costs and CO2 of a gasoline and an electric car.
#[derive(Parser)]
#[command(name = "ev_savings", version, about, long_about = None)]
struct Args {
    /// Label for this comparison
    #[arg(long, default_value = "Savings")]
    calculator_type: String,

    #[arg(long, default_value_t = 15000.)]
    miles_per_year: f64,

    /// Gasoline car fuel economy, in miles per gallon
    #[arg(long, default_value_t = 25.)]
    mpg: f64,

    /// Price per gallon
    #[arg(long, default_value_t = 3.50)]
    gas_price: f64,

    /// Electric car efficiency, in miles per kWh
    #[arg(long, default_value_t = 4.)]
    miles_per_kwh: f64,

    /// Price per kWh
    #[arg(long, default_value_t = 0.13)]
    electric_price: f64,

    /// Yearly maintenance of the gasoline car
    #[arg(long, default_value_t = 500.)]
    gas_maintenance: f64,

    /// Yearly maintenance of the electric car
    #[arg(long, default_value_t = 200.)]
    electric_maintenance: f64,

    #[arg(long, default_value_t = 25000.)]
    gas_car_price: f64,

    #[arg(long, default_value_t = 30000.)]
    electric_car_price: f64,

    /// kg of CO2 per gallon burned
    #[arg(long, default_value_t = 8.89)]
    co2_per_gallon: f64,

    /// kg of CO2 per kWh drawn from the grid
    #[arg(long, default_value_t = 0.43)]
    co2_per_kwh: f64,

    /// Print the three-line summary instead of the detailed results
    #[arg(long)]
    summary: bool,

    /// Write the results as CSV
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_REPORT_FILE)]
    csv: Option<PathBuf>,

    /// Draw the cost and CO2 charts
    #[arg(long)]
    plot: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut calculator = ElectricCarSavingsCalculator::builder()
        .calculator_type(args.calculator_type)
        .miles_per_year(args.miles_per_year)
        .mpg(args.mpg)
        .gas_price(args.gas_price)
        .miles_per_kwh(args.miles_per_kwh)
        .electric_price(args.electric_price)
        .gas_maintenance(args.gas_maintenance)
        .electric_maintenance(args.electric_maintenance)
        .gas_car_price(args.gas_car_price)
        .electric_car_price(args.electric_car_price)
        .co2_per_gallon(args.co2_per_gallon)
        .co2_per_kwh(args.co2_per_kwh)
        .build()?;

    calculator
        .compute_gasoline_cost()?
        .compute_electric_cost()?
        .compute_savings()?
        .display_results(!args.summary)?;

    if let Some(path) = args.csv {
        calculator.export_results(path)?;
    }

    if args.plot {
        let mut renderer = TextBarChart::stdout();
        calculator.plot_costs(&mut renderer)?;
        calculator.plot_co2_reduction(&mut renderer)?;
    }

    Ok(())
}
