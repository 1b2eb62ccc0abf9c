use console::Style;
use crater_core::catalog::{Catalog, CraterRecord};
use crater_core::pipeline::{CraterConfig, PipelineOutcome};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    success: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
        }
    }
}

pub fn print_detect_summary(image_id: &str, config: &CraterConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Crater Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Image"), s.path.apply_to(image_id));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Catalog"),
        s.path.apply_to(config.catalog.path.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Detection"));
    println!("    {:<12}{}", s.label.apply_to("Strategy"), s.method.apply_to(&config.detector));
    println!("    {:<12}{}", s.label.apply_to("Threshold"), s.value.apply_to(config.threshold));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min conf."),
        s.value.apply_to(config.scoring.min_confidence)
    );
    println!("    {:<12}{}", s.label.apply_to("Keep"), s.value.apply_to(config.scoring.selection));
    println!();

    println!("  {}", s.header.apply_to("Geolocation"));
    println!("    {:<12}{}", s.label.apply_to("Projector"), s.disabled.apply_to(&config.geolocation));
    println!();
}

pub fn print_outcome(image_id: &str, outcome: &PipelineOutcome) {
    let s = Styles::new();
    match outcome {
        PipelineOutcome::AlreadyCataloged { records } => {
            println!(
                "  {} {}",
                s.disabled.apply_to("Already cataloged:"),
                s.path.apply_to(image_id)
            );
            print_record_rows(&s, records);
        }
        PipelineOutcome::Cataloged { token, records, .. } => {
            println!(
                "  {} {} crater(s) saved under token {}",
                s.success.apply_to("Cataloged:"),
                s.value.apply_to(records.len()),
                s.value.apply_to(token)
            );
            print_record_rows(&s, records);
        }
        PipelineOutcome::NothingFound { detected } => {
            println!(
                "  {} no craters detected in {} ({} candidate(s) below the confidence bar)",
                s.disabled.apply_to("Nothing found:"),
                s.path.apply_to(image_id),
                detected
            );
        }
    }
    println!();
}

pub fn print_records(image_id: &str, records: &[CraterRecord]) {
    let s = Styles::new();
    println!(
        "  {} {} ({} record(s))",
        s.success.apply_to("Cataloged:"),
        s.path.apply_to(image_id),
        records.len()
    );
    print_record_rows(&s, records);
}

fn print_record_rows(s: &Styles, records: &[CraterRecord]) {
    for record in records {
        let position = match (record.center_x, record.center_y) {
            (Some(x), Some(y)) => format!("({x}, {y})"),
            _ => "-".to_string(),
        };
        let radius = record.radius.map_or("-".to_string(), |r| format!("r={r}"));
        let coords = match (record.latitude, record.longitude) {
            (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
            _ => "-".to_string(),
        };
        println!(
            "    {:<8}{:<14}{:<8}{}",
            s.label.apply_to(format!("#{}", record.token)),
            s.value.apply_to(position),
            s.value.apply_to(radius),
            s.method.apply_to(coords)
        );
    }
}

pub fn print_catalog_summary(catalog: &Catalog) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Crater Catalog"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();
    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(catalog.path().display()));
    if catalog.is_empty() {
        println!("  {:<14}{}", s.label.apply_to("Rows"), s.disabled.apply_to("empty"));
    } else {
        println!("  {:<14}{}", s.label.apply_to("Rows"), s.value.apply_to(catalog.len()));
        println!("  {:<14}{}", s.label.apply_to("Images"), s.value.apply_to(catalog.image_count()));
    }
    println!("  {:<14}{}", s.label.apply_to("Next token"), s.value.apply_to(catalog.next_token()));
    println!();
}

pub fn print_error(err: &anyhow::Error) {
    let s = Styles::new();
    eprintln!("{} {err:#}", s.error.apply_to("error:"));
}
