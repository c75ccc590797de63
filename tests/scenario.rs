use std::path::{Path, PathBuf};

use ev_savings::{
    BarChart, CalculationState, CalculatorError, ChartRenderer, ElectricCarSavingsCalculator,
    MetricRow, Result, SavingsCalculator, SavingsCalculatorBuilder, TabularWriter,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn reference_builder() -> SavingsCalculatorBuilder {
    ElectricCarSavingsCalculator::builder()
        .calculator_type("Savings")
        .miles_per_year(15000.)
        .mpg(25.)
        .gas_price(3.50)
        .miles_per_kwh(4.)
        .electric_price(0.13)
        .gas_maintenance(500.)
        .electric_maintenance(200.)
        .gas_car_price(25000.)
        .electric_car_price(30000.)
        .co2_per_gallon(8.89)
        .co2_per_kwh(0.43)
}

fn computed() -> ElectricCarSavingsCalculator {
    let mut calculator = reference_builder().build().unwrap();
    calculator
        .compute_gasoline_cost()
        .unwrap()
        .compute_electric_cost()
        .unwrap()
        .compute_savings()
        .unwrap();
    calculator
}

#[derive(Default)]
struct RecordingWriter {
    calls: Vec<(PathBuf, Vec<MetricRow>)>,
}

impl TabularWriter for RecordingWriter {
    fn write_table(&mut self, destination: &Path, rows: &[MetricRow]) -> Result<()> {
        self.calls.push((destination.to_path_buf(), rows.to_vec()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingRenderer {
    charts: Vec<BarChart>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &BarChart) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

#[test]
fn reference_scenario_end_to_end() {
    let calculator = computed();
    assert_eq!(calculator.state(), CalculationState::SavingsComputed);
    assert_close(calculator.gas_annual_cost().unwrap(), 2100.);
    assert_close(calculator.electric_annual_cost().unwrap(), 487.5);
    assert_close(calculator.annual_savings().unwrap(), 1912.5);
    assert_close(calculator.compute_payback_period().unwrap(), -2.614379);
    assert_close(calculator.compute_co2_reduction().unwrap(), 3721.5);
}

#[test]
fn savings_formula_holds_for_other_inputs() {
    let mut calculator = reference_builder()
        .miles_per_year(12000.)
        .mpg(30.)
        .gas_price(4.)
        .miles_per_kwh(3.5)
        .electric_price(0.2)
        .gas_maintenance(800.)
        .electric_maintenance(350.)
        .build()
        .unwrap();
    calculator
        .compute_electric_cost()
        .unwrap()
        .compute_gasoline_cost()
        .unwrap()
        .compute_savings()
        .unwrap();
    let expected = (12000. / 30. * 4. - 12000. / 3.5 * 0.2) + (800. - 350.);
    assert_close(calculator.annual_savings().unwrap(), expected);
}

#[test]
fn missing_parameter_prevents_construction() {
    let err = SavingsCalculatorBuilder::new()
        .calculator_type("Savings")
        .mpg(25.)
        .build()
        .unwrap_err();
    let CalculatorError::Configuration { missing } = err else {
        panic!("expected a configuration error");
    };
    assert_eq!(missing.len(), 10);
    assert!(!missing.contains(&"mpg"));
    assert!(missing.contains(&"co2_per_kwh"));
}

#[test]
fn savings_before_costs_fails() {
    let mut calculator = reference_builder().build().unwrap();
    assert!(matches!(
        calculator.compute_savings(),
        Err(CalculatorError::State(_))
    ));
    assert_eq!(calculator.state(), CalculationState::Unvalidated);
}

#[test]
fn zero_miles_per_kwh_is_a_validation_error() {
    let mut calculator = reference_builder().miles_per_kwh(0.).build().unwrap();
    assert!(calculator.compute_gasoline_cost().is_err());
    assert!(matches!(
        calculator.compute_electric_cost(),
        Err(CalculatorError::Validation {
            parameter: "miles_per_kwh",
            ..
        })
    ));
    assert_eq!(calculator.electric_annual_cost(), None);
}

#[test]
fn export_hands_five_ordered_rows_to_writer() {
    let calculator = computed();
    let mut writer = RecordingWriter::default();
    calculator
        .export_results_with(&mut writer, "report.csv")
        .unwrap();

    assert_eq!(writer.calls.len(), 1);
    let (destination, rows) = &writer.calls[0];
    assert_eq!(destination, Path::new("report.csv"));
    let metrics: Vec<&str> = rows.iter().map(|r| r.metric.as_str()).collect();
    assert_eq!(
        metrics,
        [
            "Annual Gasoline Cost",
            "Annual Electric Cost",
            "Annual Savings",
            "Payback Period (years)",
            "CO2 Reduction (kg)",
        ]
    );
    let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, ["$2100.00", "$487.50", "$1912.50", "-2.61", "3721.50"]);
}

#[test]
fn export_before_savings_writes_nothing() {
    let mut calculator = reference_builder().build().unwrap();
    calculator.compute_gasoline_cost().unwrap();
    let mut writer = RecordingWriter::default();
    let err = calculator
        .export_results_with(&mut writer, "report.csv")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CalculatorError>(),
        Some(CalculatorError::State(_))
    ));
    assert!(writer.calls.is_empty());
}

#[test]
fn export_results_writes_csv_file() {
    let path = std::env::temp_dir().join(format!(
        "ev_savings_scenario_{}.csv",
        std::process::id()
    ));
    computed().export_results(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(
        contents,
        "Metric,Value\n\
         Annual Gasoline Cost,$2100.00\n\
         Annual Electric Cost,$487.50\n\
         Annual Savings,$1912.50\n\
         Payback Period (years),-2.61\n\
         CO2 Reduction (kg),3721.50\n"
    );
}

#[test]
fn plots_reach_the_renderer() {
    let calculator = computed();
    let mut renderer = RecordingRenderer::default();
    calculator.plot_costs(&mut renderer).unwrap();
    calculator.plot_co2_reduction(&mut renderer).unwrap();

    assert_eq!(renderer.charts.len(), 2);
    assert_eq!(renderer.charts[0].bars.len(), 3);
    assert_eq!(renderer.charts[1].y_label, "CO2 (kg)");
    assert_close(renderer.charts[1].bars[2].value, 3721.5);
}

#[test]
fn co2_chart_needs_no_prior_calculation() {
    let calculator = reference_builder().build().unwrap();
    let mut renderer = RecordingRenderer::default();
    calculator.plot_co2_reduction(&mut renderer).unwrap();
    assert!(calculator.plot_costs(&mut renderer).is_err());
    assert_eq!(renderer.charts.len(), 1);
}
