//! Text and CSV renderings of reports.

use std::fmt::Write;

use crate::models::report::SolarReport;
use crate::models::Status;

/// Columns of the CSV rendering.
pub const CSV_HEADER: [&str; 14] = [
    "query",
    "generated_at",
    "status",
    "latitude",
    "longitude",
    "annual_production_kwh",
    "irradiation_kwh_per_m2",
    "country",
    "electricity_cost_usd_per_kwh",
    "annual_savings_usd",
    "co2_avoided_kg",
    "payback_years",
    "rating",
    "tier",
];

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One CSV row for `report`, in `CSV_HEADER` order.
pub fn csv_row(report: &SolarReport) -> Vec<String> {
    let record = &report.record;
    let economics = &report.economics;
    vec![
        report.query.clone(),
        report.generated_at.to_rfc3339(),
        record.status().to_string(),
        cell(record.latitude()),
        cell(record.longitude()),
        cell(record.annual_production_kwh()),
        cell(record.irradiation_kwh_per_m2()),
        record.country.clone().unwrap_or_default(),
        cell(record.electricity_cost_usd_per_kwh),
        cell(economics.annual_savings_usd),
        cell(economics.co2_avoided_kg),
        cell(economics.payback_years),
        economics.rating.map(|r| r.to_string()).unwrap_or_default(),
        serde_json::to_value(report.tier)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
    ]
}

/// CSV table with a header row and one row per report.
pub fn render_csv(reports: &[SolarReport]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for report in reports {
        wtr.write_record(csv_row(report))?;
    }
    let data = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Human-readable summary of `report`.
pub fn render_text(report: &SolarReport) -> String {
    let record = &report.record;
    let mut out = String::new();

    let _ = writeln!(out, "Solar report: {}", report.query);
    let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Status: {}", record.status());
    out.push('\n');

    match record.status() {
        Status::Failed => {
            out.push_str("No data could be extracted from the transcript.\n");
        }
        Status::Partial => {
            let missing: Vec<&str> = record.missing_fields().iter().map(|f| f.label()).collect();
            let _ = writeln!(out, "Missing fields: {}", missing.join(", "));
            out.push('\n');
            write_fields(&mut out, report);
        }
        Status::Completed => {
            write_fields(&mut out, report);
        }
    }

    if !report.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    out
}

fn write_fields(out: &mut String, report: &SolarReport) {
    let record = &report.record;
    let economics = &report.economics;

    if let Some((lat, lon)) = record.coordinates() {
        let _ = writeln!(out, "Coordinates: {:.4}, {:.4}", lat, lon);
    } else if let Some(lat) = record.latitude() {
        let _ = writeln!(out, "Latitude: {:.4}", lat);
    } else if let Some(lon) = record.longitude() {
        let _ = writeln!(out, "Longitude: {:.4}", lon);
    }
    if let Some(production) = record.annual_production_kwh() {
        let _ = writeln!(out, "Annual production: {:.2} kWh", production);
    }
    if let Some(irradiation) = record.irradiation_kwh_per_m2() {
        let _ = writeln!(out, "Irradiation: {:.2} kWh/m²", irradiation);
    }
    if let Some(country) = &record.country {
        let _ = writeln!(out, "Country: {}", country);
    }
    if let Some(cost) = record.electricity_cost_usd_per_kwh {
        let _ = writeln!(out, "Electricity cost: {:.3} USD/kWh", cost);
    }

    if let Some(rating) = economics.rating {
        let _ = writeln!(out, "Production rating: {}", rating);
    }
    if let Some(co2) = economics.co2_avoided_kg {
        let _ = writeln!(out, "CO2 avoided: {:.0} kg/year", co2);
    }
    if let Some(savings) = economics.annual_savings_usd {
        let _ = writeln!(out, "Annual savings: {:.2} USD", savings);
        match economics.payback_years {
            Some(years) => {
                let _ = writeln!(out, "Payback: {:.1} years", years);
            }
            None => out.push_str("Payback: not calculable\n"),
        }
        if let Some(year) = economics.break_even_year {
            let _ = writeln!(out, "Break-even: year {}", year);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::SolarExtractor;
    use crate::report::ReportAssembler;

    fn report(text: &str, cost: Option<f64>) -> SolarReport {
        let mut result = SolarExtractor::new().extract(text);
        result.record.electricity_cost_usd_per_kwh = cost;
        ReportAssembler::default().assemble("test", text, result)
    }

    #[test]
    fn test_failed_report_text() {
        let text = render_text(&report("nothing useful here", None));
        assert!(text.contains("Status: failed"));
        assert!(text.contains("No data could be extracted"));
    }

    #[test]
    fn test_partial_report_lists_missing_fields() {
        let text = render_text(&report("Yearly PV energy production [kWh]: 1696.92", None));
        assert!(text.contains("Status: partial"));
        assert!(text.contains("Missing fields: latitude, longitude, irradiation"));
        assert!(text.contains("Annual production: 1696.92 kWh"));
        assert!(!text.contains("Annual savings"));
    }

    #[test]
    fn test_completed_report_with_economics() {
        let block = "EXTRACTED DATA:\nCoordinates: 48.8584, 2.2945\nProduction: 5000 kWh\nIrradiation: 1367 kWh/m²";
        let text = render_text(&report(block, Some(0.2)));
        assert!(text.contains("Status: completed"));
        assert!(text.contains("Coordinates: 48.8584, 2.2945"));
        assert!(text.contains("Annual savings: 1000.00 USD"));
        assert!(text.contains("Payback: 15.0 years"));
        assert!(!text.contains("Missing fields"));
    }

    #[test]
    fn test_csv_rendering() {
        let csv = render_csv(&[report("Yearly PV energy production [kWh]: 1696.92", None)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("test,"));
        assert!(row.contains(",partial,,,1696.92,"));
        assert!(row.ends_with(",low,per_field"));
    }
}
