use std::path::Path;

use console::Style;
use overscan_core::analysis::UsabilityVerdict;
use overscan_core::frame::FrameImage;
use overscan_core::profile::ProfileVector;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    bad: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            bad: Style::new().red().bold(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_analysis_summary(
    path: &Path,
    frame: &FrameImage,
    nominal_start: usize,
    verdict: &UsabilityVerdict,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Overscan Analysis"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    // Input
    println!("  {}", s.header.apply_to("Input"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(path.display())
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Kind"),
        s.value.apply_to(frame.kind())
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", frame.width(), frame.height()))
    );
    if let Some(exposure) = frame.exposure_time() {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Exposure"),
            s.value.apply_to(format!("{exposure} s"))
        );
    }
    println!();

    // Plateau
    let plateau = &verdict.plateau;
    println!("  {}", s.header.apply_to("Plateau"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Nominal"),
        s.value.apply_to(nominal_start)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Effective"),
        s.value.apply_to(plateau.effective_start)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Level"),
        s.value.apply_to(format!("{:.2} {}", plateau.level, frame.unit()))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Spread"),
        s.value
            .apply_to(format!("{:.2} (tol {:.2})", plateau.spread, plateau.tolerance))
    );
    println!();

    // References
    if verdict.references.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("References"),
            s.disabled.apply_to("none")
        );
    } else {
        println!("  {}", s.header.apply_to("References"));
        for reference in &verdict.references {
            let note = if reference.dark_current_explained {
                " (dark current)"
            } else {
                ""
            };
            println!(
                "    {:<14}{}{}",
                s.label.apply_to(reference.kind),
                s.value.apply_to(format!("{:.2}", reference.level)),
                s.disabled.apply_to(note)
            );
        }
    }
    println!();

    // Verdict
    println!("  {}", s.header.apply_to("Verdict"));
    let status = if verdict.usable {
        s.good.apply_to("usable")
    } else {
        s.bad.apply_to("not usable")
    };
    println!("    {:<14}{}", s.label.apply_to("Overscan"), status);
    println!(
        "    {:<14}{}",
        s.label.apply_to("Rationale"),
        s.value.apply_to(verdict.rationale)
    );
    println!();
}

/// Print the overscan part of the profile with the boundaries marked.
pub fn print_profile(profile: &ProfileVector, nominal_start: usize, verdict: &UsabilityVerdict) {
    let s = Styles::new();
    let effective = verdict.plateau.effective_start;

    println!("  {}", s.header.apply_to(format!("Profile ({})", profile.axis)));
    for (offset, value) in profile.tail(nominal_start).iter().enumerate() {
        let index = nominal_start + offset;
        let marker = match (index == nominal_start, index == effective) {
            (true, true) => "nominal, effective",
            (true, false) => "nominal",
            (false, true) => "effective",
            (false, false) => "",
        };
        println!(
            "    {:>6}  {:>12.2}  {}",
            s.label.apply_to(index),
            value,
            s.disabled.apply_to(marker)
        );
    }
    println!();
}
