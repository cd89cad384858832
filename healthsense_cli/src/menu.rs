//! Interactive line-oriented menu.
//!
//! Reads one answer per line. End of input behaves like choosing Exit so
//! the console can be driven from a pipe.

use healthsense_core::*;
use std::io::{self, BufRead, Write};

const MENU: &str = "
=== HealthSense Outbreak CLI ===
1. Add hospital
2. Add disease record to hospital
3. Search by disease name
4. Search hospitals by patient count
5. Sort disease records for a hospital by case count
6. Sort disease records for a hospital by week (chronological)
7. Show weekly trend for a disease across hospitals
8. Detect synchronized peaks for a disease
9. Enqueue outbreak report
10. View outbreak queue for region
11. Dismiss oldest outbreak report for region
12. View/build severity tree (with traversals)
13. Undo last operation
14. Exit";

/// Run the menu loop until Exit or end of input
pub fn run<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    loop {
        println!("{}", MENU);
        let Some(choice) = prompt(input, "Select: ")? else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => add_hospital(engine, input),
            "2" => add_record(engine, input),
            "3" => search_by_disease(engine, input),
            "4" => search_by_count(engine, input),
            "5" => sort_history(engine, input, SortKey::CaseCountDesc),
            "6" => sort_history(engine, input, SortKey::WeekAsc),
            "7" => weekly_trend(engine, input),
            "8" => synchronized_peaks(engine, input),
            "9" => enqueue_report(engine, input),
            "10" => view_queue(engine, input),
            "11" => dismiss_report(engine, input),
            "12" => severity_tree(engine, input),
            "13" => undo(engine),
            "14" => break,
            _ => {
                println!("Invalid choice.");
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(Error::Io(e)) => return Err(Error::Io(e)),
            Err(e) => println!("{}", e),
        }
        println!("------");
    }

    println!("Exiting.");
    Ok(())
}

/// Print `label` and read one trimmed line; `None` at end of input
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like `prompt`, but end of input is an error for a half-answered action
fn ask<R: BufRead>(input: &mut R, label: &str) -> Result<String> {
    prompt(input, label)?.ok_or_else(|| {
        Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    })
}

fn ask_number<R: BufRead>(input: &mut R, label: &str) -> Result<u32> {
    let raw = ask(input, label)?;
    raw.parse::<u32>()
        .map_err(|_| Error::invalid_input(format!("'{}' is not a whole number", raw)))
}

fn add_hospital<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let name = ask(input, "Enter hospital name: ")?;
    let region = ask(input, "Enter region: ")?;

    let hospital = engine.add_hospital(&name, &region)?;
    println!("Added hospital {} in {}.", hospital.name(), hospital.region());
    Ok(())
}

fn add_record<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let hospital = ask(input, "Hospital name: ")?;
    let disease = ask(input, "Disease name: ")?;
    let week = ask_number(input, "Week number (integer): ")?;
    let count = ask_number(input, "Case count: ")?;

    let record = Record::new(&disease, week, count)?;
    let line = format!("Added record to {}: {}", hospital, record);
    engine.add_record(&hospital, record)?;
    println!("{}", line);
    Ok(())
}

fn search_by_disease<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let disease = ask(input, "Disease name to search: ")?;

    let matches = engine.search_by_disease(&disease);
    if matches.is_empty() {
        println!("No occurrences found.");
    }
    for m in matches {
        println!(
            "Hospital {} has record: {} (week {}, count {})",
            m.hospital.name(), m.record.disease_name(), m.record.week_number(), m.record.case_count()
        );
    }
    Ok(())
}

fn search_by_count<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let threshold = ask_number(input, "Minimum case count to filter: ")?;
    let disease = ask(input, "Disease name (or blank for any): ")?;
    let filter = (!disease.is_empty()).then_some(disease.as_str());

    let matches = engine.records_at_least(threshold, filter);
    if matches.is_empty() {
        println!("No records at or above {} cases.", threshold);
    }
    for m in matches {
        println!(
            "Hospital {} has {} cases {} in week {}",
            m.hospital.name(), m.record.disease_name(), m.record.case_count(), m.record.week_number()
        );
    }
    Ok(())
}

fn sort_history<R: BufRead>(engine: &mut Engine, input: &mut R, key: SortKey) -> Result<()> {
    let label = match key {
        SortKey::CaseCountDesc => "Hospital name to sort by case count: ",
        SortKey::WeekAsc => "Hospital name to sort by week: ",
    };
    let name = ask(input, label)?;

    let hospital = engine.sort_history(&name, key)?;
    match key {
        SortKey::CaseCountDesc => println!("Sorted disease records by case count for {}:", hospital.name()),
        SortKey::WeekAsc => println!("Sorted disease records chronologically for {}:", hospital.name()),
    }
    print_history(hospital.history());
    Ok(())
}

fn print_history(history: &DiseaseHistory) {
    if history.is_empty() {
        println!("(empty)");
    }
    for record in history {
        println!("  {}", record);
    }
}

fn weekly_trend<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let disease = ask(input, "Disease name: ")?;

    let trends = engine.weekly_trends(&disease);
    if trends.is_empty() {
        println!("No records for {}.", disease);
    }
    for trend in trends {
        println!(
            "Hospital: {} (Region: {})",
            trend.hospital.name(), trend.hospital.region()
        );
        for (week, total) in &trend.weeks {
            println!("  Week {} : {} cases", week, total);
        }
    }
    Ok(())
}

fn synchronized_peaks<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let disease = ask(input, "Disease name: ")?;
    let overlap = ask_number(input, "Minimum hospitals overlapping peak (e.g., 1): ")?;

    let peaks = engine.synchronized_peaks(&disease, overlap as usize)?;
    println!("Synchronized peak weeks for disease {}:", disease);
    if peaks.is_empty() {
        println!("  (none meeting overlap threshold)");
    }
    for peak in peaks {
        println!(
            "  Week {}: {} hospitals showing peak ({})",
            peak.week,
            peak.hospitals.len(),
            peak.hospitals.join(", ")
        );
    }
    Ok(())
}

fn enqueue_report<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let region = ask(input, "Region: ")?;
    let hospital = ask(input, "Hospital: ")?;
    let summary = ask(input, "Summary: ")?;

    engine.enqueue_report(Report::new(&region, &hospital, &summary)?)?;
    println!("Report enqueued.");
    Ok(())
}

fn view_queue<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let region = ask(input, "Region to view queue: ")?;
    if region.is_empty() {
        return Err(Error::invalid_input("region is empty"));
    }

    let reports = engine.region_reports(&region)?;
    let display = engine.alerts().region_name(&region).unwrap_or(&region);
    println!("Outbreak reports for {}:", display);
    if reports.is_empty() {
        println!("(queue empty)");
    }
    for report in reports {
        println!("  {}", report);
    }
    Ok(())
}

fn dismiss_report<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    let region = ask(input, "Region: ")?;

    let report = engine.dequeue_report(&region)?;
    println!("Dismissed: {}", report);
    if let Ok(next) = engine.peek_report(&region) {
        println!("Next up: {}", next);
    }
    Ok(())
}

fn severity_tree<R: BufRead>(engine: &mut Engine, input: &mut R) -> Result<()> {
    println!("Choose traversal: 1-inorder 2-preorder 3-postorder");
    let choice = ask(input, "> ")?;
    let (order, heading) = match choice.as_str() {
        "1" => (Traversal::InOrder, "In-order traversal (low to high severity):"),
        "2" => (Traversal::PreOrder, "Pre-order traversal:"),
        "3" => (Traversal::PostOrder, "Post-order traversal:"),
        _ => {
            println!("Invalid.");
            return Ok(());
        }
    };

    let entries = engine.classify_severity(order);
    println!("Severity tree built from current peak counts.");
    println!("{}", heading);
    for entry in entries {
        println!("  {}", entry);
    }
    Ok(())
}

fn undo(engine: &mut Engine) -> Result<()> {
    match engine.undo()? {
        Some(operation) => println!(
            "Undid last operation ({} on {}).",
            operation.label(),
            operation.hospital()
        ),
        None => println!("Nothing to undo."),
    }
    Ok(())
}
