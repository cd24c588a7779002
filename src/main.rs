//! Fraction Foods entry point
//!
//! The browser build is driven from JavaScript through `fraction_foods::web`.
//! Natively this binary dumps layouts as JSON or plays a scripted session on
//! a virtual clock.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use fraction_foods::celebration::LogCelebration;
    use fraction_foods::session::{GuessField, ManualScheduler, SessionController};
    use fraction_foods::viewport::SharedViewport;
    use fraction_foods::{FractionSpec, Settings, Shape, compute_layout};

    const USAGE: &str = "usage:
  fraction-foods layout <shape> <numerator> <denominator> [size] [scale]
  fraction-foods play [seed] [rounds]
  fraction-foods settings [--write]

shapes: pizza, brownie, pancake, pie, chocolate-bar, donut";

    pub fn run(args: &[String]) -> Result<(), String> {
        match args.first().map(String::as_str) {
            Some("layout") => layout(&args[1..]),
            Some("play") => play(&args[1..]),
            Some("settings") => settings(&args[1..]),
            _ => Err(USAGE.to_string()),
        }
    }

    fn number(arg: Option<&String>, default: f64) -> Result<f64, String> {
        match arg {
            Some(s) => s.parse().map_err(|e| format!("bad number {s:?}: {e}")),
            None => Ok(default),
        }
    }

    fn layout(args: &[String]) -> Result<(), String> {
        let shape = args
            .first()
            .and_then(|s| Shape::from_str(s))
            .ok_or_else(|| USAGE.to_string())?;
        let fraction = FractionSpec::coerce(number(args.get(1), 0.0)?, number(args.get(2), 1.0)?);
        let size = number(args.get(3), fraction_foods::consts::DEFAULT_SIZE as f64)? as f32;
        let scale = number(args.get(4), 1.0)? as f32;

        let layout = compute_layout(shape, fraction, size, scale, &shape.default_colors());
        log::info!(
            "{} {}: {} dividers, {} decorations",
            shape,
            layout.fraction,
            layout.dividers.len(),
            layout.decorations.len()
        );
        let json = layout.to_json().map_err(|e| e.to_string())?;
        println!("{json}");
        Ok(())
    }

    /// Print the effective settings; `--write` stores them in the settings file
    fn settings(args: &[String]) -> Result<(), String> {
        let settings = Settings::load();
        println!("{}", settings.to_json().map_err(|e| e.to_string())?);
        if args.first().map(String::as_str) == Some("--write") {
            if std::env::var_os(Settings::PATH_ENV).is_none() {
                return Err(format!("set {} to choose a settings file", Settings::PATH_ENV));
            }
            settings.save();
        }
        Ok(())
    }

    type CliSession = SessionController<ManualScheduler, LogCelebration>;

    fn guess_field(session: &CliSession, field: GuessField) -> u32 {
        match field {
            GuessField::Numerator => session.user_guess().numerator,
            GuessField::Denominator => session.user_guess().denominator,
        }
    }

    /// Step one guess input toward `target`, stopping at the input bounds
    fn dial(session: &mut CliSession, field: GuessField, target: u32) {
        loop {
            let current = guess_field(session, field);
            if current == target {
                return;
            }
            session.adjust_guess(field, if current < target { 1 } else { -1 });
            if guess_field(session, field) == current {
                log::warn!("Cannot dial {:?} from {} to {}", field, current, target);
                return;
            }
        }
    }

    /// Play `rounds` rounds: one wrong answer, then dial in the right one
    fn play(args: &[String]) -> Result<(), String> {
        let seed = number(args.first(), 12345.0)? as u64;
        let rounds = number(args.get(1), 8.0)? as u32;

        let settings = Settings::load();
        let celebrate_ms = settings.celebrate_delay_ms as u64;
        let shake_ms = settings.shake_delay_ms as u64;
        let viewport = SharedViewport::new(1024.0);
        let mut session = SessionController::new(settings, ManualScheduler::new(), LogCelebration, seed);
        session.attach_viewport(&viewport);

        for round in 0..rounds {
            // Alternate phone and desktop widths to exercise scaling
            viewport.set_width(if round % 2 == 0 { 1024.0 } else { 340.0 });
            let target = session.active_fraction();
            println!(
                "round {}: {} (scale {}) -> {}",
                round + 1,
                session.prompt(),
                session.scale_factor(),
                target
            );

            session.submit(FractionSpec::new(target.numerator, target.denominator + 1));
            println!("  wrong guess -> {:?}", session.phase());
            session.advance_clock(shake_ms);

            dial(&mut session, GuessField::Numerator, target.numerator);
            dial(&mut session, GuessField::Denominator, target.denominator);
            session.submit_current_guess();
            println!("  guess {} -> {:?}", session.user_guess(), session.phase());
            session.advance_clock(celebrate_ms);
        }

        let stats = session.stats();
        println!(
            "{} rounds, {} wrong attempts, {} full passes",
            stats.rounds_completed, stats.wrong_attempts, stats.sequences_completed
        );
        session.teardown();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fraction Foods (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = native::run(&args) {
        eprintln!("{e}");
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is fraction_foods::web::start, this is just to satisfy the compiler
}
