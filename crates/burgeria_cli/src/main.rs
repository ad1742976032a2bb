use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use burgeria_control::{CommandSource, CustomerFlow, LineCook};
use burgeria_core::{Event, EventLevel, GameState};
use burgeria_world::{
    build_initial_state, list_saves, load_content, load_save, save_state, seeded_rng,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "burgeria_cli", about = "Burgeria headless runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the shop for a fixed number of ticks.
    Run {
        #[arg(long)]
        ticks: u64,
        /// Start a fresh game with this seed. Mutually exclusive with --load-slot.
        #[arg(long, conflicts_with = "load_slot")]
        seed: Option<u64>,
        /// Resume from a save slot. Mutually exclusive with --seed.
        #[arg(long, conflicts_with = "seed")]
        load_slot: Option<u32>,
        #[arg(long, default_value = "./content")]
        content_dir: String,
        #[arg(long, default_value_t = 100)]
        print_every: u64,
        #[arg(long, default_value = "normal", value_parser = ["normal", "debug"])]
        event_level: String,
        /// Save the final state into this slot when the run ends.
        #[arg(long)]
        save_slot: Option<u32>,
        #[arg(long, default_value = "./saves")]
        save_dir: String,
    },
    /// List save slots.
    Saves {
        #[arg(long, default_value = "./saves")]
        save_dir: String,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn run(
    ticks: u64,
    seed: Option<u64>,
    load_slot: Option<u32>,
    content_dir: &str,
    print_every: u64,
    event_level: EventLevel,
    save_slot: Option<u32>,
    save_dir: &str,
) -> Result<()> {
    let content = load_content(content_dir)?;
    let save_dir = std::path::Path::new(save_dir);

    let (mut state, mut rng) = if let Some(slot) = load_slot {
        let save = load_save(save_dir, slot)?;
        if save.state.meta.content_version != content.content_version {
            tracing::warn!(
                save = %save.state.meta.content_version,
                loaded = %content.content_version,
                "save was made against different content",
            );
        }
        let rng = seeded_rng(save.state.meta.seed);
        (save.state, rng)
    } else {
        let resolved_seed = seed.unwrap_or_else(rand::random);
        let state = build_initial_state(&content, resolved_seed);
        (state, seeded_rng(resolved_seed))
    };

    let mut flow = CustomerFlow::new();
    let mut cook = LineCook;
    let mut next_command_id = state.counters.next_command_id;

    println!(
        "Opening the shop: ticks={ticks} seed={} day={} content_version={}",
        state.meta.seed, state.day, content.content_version,
    );
    println!("{}", "-".repeat(80));

    for _ in 0..ticks {
        let mut commands = flow.generate_commands(&state, &content, &mut next_command_id);
        commands.extend(cook.generate_commands(&state, &content, &mut next_command_id));

        let events = burgeria_core::tick(&mut state, &commands, &content, &mut rng, event_level);

        // Print notable events regardless of print_every.
        for envelope in &events {
            match &envelope.event {
                Event::DayStarted { day, newly_unlocked } => {
                    let unlocked: Vec<String> =
                        newly_unlocked.iter().map(ToString::to_string).collect();
                    println!(
                        "*** DAY {day} at tick={:04} *** new on the menu: [{}]",
                        state.meta.tick,
                        unlocked.join(", "),
                    );
                }
                Event::BurgerEvaluated {
                    order_number,
                    score,
                    payment,
                    tip,
                } => {
                    println!(
                        "order {order_number}: score={score:.2} payment={payment} tip={tip}"
                    );
                }
                Event::CommandRejected { command, reason } => {
                    tracing::debug!(%command, %reason, "command rejected");
                }
                _ => {}
            }
        }

        if should_print(state.meta.tick, print_every) {
            print_status(&state);
        }
    }

    state.counters.next_command_id = next_command_id;

    println!("{}", "-".repeat(80));
    println!("Closing time. Final state at tick {}:", state.meta.tick);
    print_status(&state);

    if let Some(slot) = save_slot {
        let summary = save_state(save_dir, slot, &state, &mut rng)?;
        println!(
            "Saved slot {} ({}) at day {} with balance {}.",
            summary.slot, summary.save_id, summary.day, summary.balance,
        );
    }

    Ok(())
}

/// Status-line cadence. `every == 0` disables periodic printing.
fn should_print(tick: u64, every: u64) -> bool {
    every > 0 && tick % every == 0
}

fn print_status(state: &GameState) {
    println!(
        "[tick={tick:04}  day={day}]  balance={balance:5}  \
         register={register:2}  waiting={waiting:2}  \
         grill={grill:2}  tray={tray:2}  stack={stack}",
        tick = state.meta.tick,
        day = state.day,
        balance = state.balance,
        register = state.register.register_line.len(),
        waiting = state.register.wait_line.len(),
        grill = state.grill.occupied_count(),
        tray = state.cooked_tray.len(),
        stack = state.assembly.len(),
    );
}

fn print_saves(save_dir: &str) -> Result<()> {
    let summaries = list_saves(std::path::Path::new(save_dir))
        .with_context(|| format!("listing saves in {save_dir}"))?;
    if summaries.is_empty() {
        println!("No saves in {save_dir}.");
        return Ok(());
    }
    for summary in summaries {
        println!(
            "slot {}: day {} balance {} saved {} ({})",
            summary.slot, summary.day, summary.balance, summary.saved_at, summary.save_id,
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            ticks,
            seed,
            load_slot,
            content_dir,
            print_every,
            event_level,
            save_slot,
            save_dir,
        } => {
            let level = match event_level.as_str() {
                "debug" => EventLevel::Debug,
                _ => EventLevel::Normal,
            };
            run(
                ticks,
                seed,
                load_slot,
                &content_dir,
                print_every,
                level,
                save_slot,
                &save_dir,
            )?;
        }
        Commands::Saves { save_dir } => print_saves(&save_dir)?,
    }
    Ok(())
}
