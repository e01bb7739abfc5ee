use cragfinder::{CorpusIndex, EntityRef, Grade, GradeMatchOptions, SearchResultVerbose, is_grade_equal, routes_with_grade};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Grade filter requested on the command line.
pub struct GradeQuery {
    pub grade: Grade,
    pub options: GradeMatchOptions,
}

pub fn print_run(run: &SearchResultVerbose<'_>, index: &CorpusIndex<'_>, grade: Option<&GradeQuery>, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Searching: \"{}\"", run.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Pairs ━━━", ansi::GRAY));
    print_pairs(run, &palette);

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    match run.result.filtered_result {
        Some(best) => print_result(run, best, index, &palette),
        None => {
            println!("{}", palette.dim("  No match"));
            println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
            println!("  • The query has no letters to match on");
            println!("  • A forced --location matched no ancestor");
            println!("  • --only-routes / --only-areas excluded every match");
            println!("\n{}", palette.dim("  Tip: Set RUST_LOG=cragfinder=debug to trace every pair"));
        }
    }

    if let (Some(query), Some(best)) = (grade, run.result.filtered_result) {
        println!("\n{}", palette.paint("━━━ Grades ━━━", ansi::GRAY));
        print_grades(query, best, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Visited: {}  │  Fallback: {}",
        palette.paint(format!("{:?}", run.metrics.total), ansi::GREEN),
        palette.paint(run.metrics.visited.to_string(), ansi::CYAN),
        palette.dim(if run.metrics.fallback { "yes" } else { "no" }),
    );
    println!();
}

fn print_pairs(run: &SearchResultVerbose<'_>, palette: &ansi::Palette) {
    for (idx, pair) in run.metrics.pairs.iter().enumerate() {
        let marker = if run.winning_pair == Some(idx) { "★" } else { " " };
        let location = if pair.location.is_empty() { "-".to_string() } else { format!("\"{}\"", pair.location) };

        println!(
            "  {}{} {} {} {}",
            palette.paint(marker, ansi::YELLOW),
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(format!("\"{}\"", pair.subject), ansi::BLUE),
            palette.dim("in"),
            palette.paint(location, ansi::CYAN),
        );
        println!(
            "      {} {}  {} {}  {}",
            palette.dim("matched:"),
            palette.paint(pair.matched.to_string(), ansi::YELLOW),
            palette.dim("kept:"),
            if pair.kept > 0 {
                palette.paint(pair.kept.to_string(), ansi::GREEN)
            } else {
                palette.dim(pair.kept.to_string())
            },
            palette.dim(format!("{:?}", pair.duration)),
        );
        if let (Some(winner), Some(tier)) = (&pair.winner, pair.tier) {
            println!("      {} {} {}", palette.dim("best:"), palette.bold(winner), palette.dim(format!("({tier})")));
        }
    }
}

fn print_result(run: &SearchResultVerbose<'_>, best: EntityRef<'_>, index: &CorpusIndex<'_>, palette: &ansi::Palette) {
    println!(
        "  {} {} {} {}",
        palette.bold(palette.paint(best.name(), ansi::GREEN)),
        palette.dim("│"),
        palette.paint(best.kind().to_string(), ansi::BLUE),
        palette.dim(format!("id {}  popularity {}", best.id(), best.popularity())),
    );

    let description = run.result.location_description();
    if !description.is_empty() {
        println!("      {}", palette.paint(description, ansi::CYAN));
    }
    if let Some(tier) = run.tier {
        println!("      {} {}", palette.dim("tier:"), palette.paint(tier.to_string(), ansi::YELLOW));
    }
    if let Some(location) = run.result.related_location {
        println!("      {} {}", palette.dim("location:"), palette.paint(location.info.name(), ansi::CYAN));
    }

    match best {
        EntityRef::Route(route) => {
            let grades: Vec<String> = route.grades().iter().map(|g| format!("{} {}", g.system(), g)).collect();
            if !grades.is_empty() {
                println!("      {} {}", palette.dim("grades:"), grades.join(", "));
            }
            if let Some(height) = &route.height {
                println!("      {} {}", palette.dim("height:"), height);
            }
        }
        EntityRef::Area(area) => {
            println!("      {} {}", palette.dim("stats:"), area.statistics);
            let popular: Vec<&str> = index.popular_routes(area).iter().map(|r| r.info.name()).collect();
            if !popular.is_empty() {
                println!("      {} {}", palette.dim("popular:"), popular.join(", "));
            }
        }
    }

    let others = run.result.all_results.len().saturating_sub(1);
    if others > 0 {
        println!("  {}", palette.dim(format!("... +{} other candidates", others)));
    }
}

fn print_grades(query: &GradeQuery, best: EntityRef<'_>, palette: &ansi::Palette) {
    let system = query.grade.system();
    let requested = query.grade.value();

    match best {
        EntityRef::Route(route) => {
            let verdict = if is_grade_equal(system, requested, route, query.options) {
                palette.paint("✓ matches", ansi::GREEN)
            } else {
                palette.dim("✗ no match")
            };
            println!("  {} {} {}", palette.paint(system.to_string(), ansi::BLUE), requested, verdict);
        }
        EntityRef::Area(area) => {
            let routes = routes_with_grade(area, system, requested, query.options);
            println!(
                "  {} {} {}",
                palette.paint(system.to_string(), ansi::BLUE),
                requested,
                palette.paint(format!("{} routes", routes.len()), ansi::GREEN)
            );
            for route in routes.iter().take(10) {
                println!("    {}", route.info.name());
            }
            if routes.len() > 10 {
                println!("    {}", palette.dim(format!("... +{} more", routes.len() - 10)));
            }
        }
    }
}
