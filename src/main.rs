//! Stronghold - two-player kingdom management at the console
//!
//! Players take turns picking one action from the menu. Every action error is
//! printed and play passes to the other kingdom.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::style::Stylize;

use stronghold::core::{KingdomConfig, Result, SimRng};
use stronghold::infrastructure::{BuildingAction, HealthcareAction};
use stronghold::kingdom::{Kingdom, LoanAction, TurnReport};
use stronghold::military::TrainingOutcome;
use stronghold::persistence::{self, LoadOutcome};
use stronghold::relations::{DiplomacyAction, Mission, MissionOutcome, SmugglingOutcome};
use stronghold::society::{ElectionOutcome, Pressure};

#[derive(Parser, Debug)]
#[command(name = "stronghold")]
#[command(about = "Turn-based kingdom management for two players")]
struct Args {
    /// Random seed for a replayable game
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the starting stores, army and population
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default file for saving game state
    #[arg(long, default_value = "stronghold_save.txt")]
    save_file: PathBuf,

    /// File scores are appended to
    #[arg(long, default_value = persistence::DEFAULT_SCORE_FILE)]
    score_file: PathBuf,

    /// Actually wait out in-world processing times
    #[arg(long, default_value_t = false)]
    real_time: bool,
}

const MENU: [&str; 20] = [
    "Play Turn",
    "Train Army",
    "Hold Election",
    "Manage Loan, Audit or Tax",
    "Buy Resource",
    "Manage Diplomacy",
    "Bribe or Blackmail",
    "Send Message",
    "Send Fake Trade Request",
    "View Messages",
    "Upgrade Blacksmith",
    "Produce Weapons",
    "Conduct Espionage",
    "Conduct Smuggling",
    "Manage Healthcare",
    "Manage Buildings",
    "Save Game State",
    "Load Game State",
    "Save Score",
    "Exit",
];

enum Flow {
    Continue,
    Exit,
}

/// Line-oriented prompts over stdin; `None` means input ran out
struct Console {
    input: io::StdinLock<'static>,
}

impl Console {
    fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }

    fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            match self.line(prompt)? {
                Some(text) if text.is_empty() => println!("{}", "Input cannot be empty.".red()),
                other => return Ok(other),
            }
        }
    }

    fn number(&mut self, min: u32, max: u32, prompt: &str) -> io::Result<Option<u32>> {
        loop {
            let Some(text) = self.line(prompt)? else {
                return Ok(None);
            };
            match text.parse::<u32>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(Some(n)),
                _ => println!(
                    "{}",
                    format!("Invalid choice. Please enter a number between {} and {}.", min, max).red()
                ),
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stronghold=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => KingdomConfig::load(path)?,
        None => KingdomConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_entropy(),
    };
    tracing::info!(seed = rng.seed(), "stronghold starting");

    let mut console = Console::new();
    println!("{}", "Welcome to Stronghold!".green());

    let Some((mut player1, mut player2)) = found_kingdoms(&mut console, &config)? else {
        return Ok(());
    };

    let mut player1_turn = true;
    let mut round = 1;
    loop {
        println!("{}", format!("\n=== Turn {} ===", round).bold());
        let label = if player1_turn { "Player 1" } else { "Player 2" };
        let (current, other) = if player1_turn {
            (&mut player1, &mut player2)
        } else {
            (&mut player2, &mut player1)
        };

        println!("{}", format!("{}'s Turn ({})", label, current.name()).green());
        println!("{}", "Status of both kingdoms:".yellow());
        let (first, second) = if player1_turn {
            (&*current, &*other)
        } else {
            (&*other, &*current)
        };
        print!("{}", first.status());
        print!("{}", second.status());

        println!("{}", "\n=== Stronghold Game Menu ===".bold());
        for (index, entry) in MENU.iter().enumerate() {
            println!("{}. {}", index + 1, entry);
        }
        let Some(choice) = console.number(1, MENU.len() as u32, "Enter your choice (1-20): ")? else {
            break;
        };

        match run_choice(choice, current, other, &mut console, &mut rng, &args) {
            Ok(Some(Flow::Continue)) => {}
            Ok(Some(Flow::Exit)) => {
                println!("{}", "Thank you for playing Stronghold!".green());
                break;
            }
            Ok(None) => break,
            Err(err) if err.shortfall().is_some() => println!("{}", format!("Error: {}", err).red()),
            Err(err) => println!("{}", format!("Unexpected error: {}", err).red()),
        }

        player1_turn = !player1_turn;
        if player1_turn {
            round += 1;
        }
    }
    Ok(())
}

fn found_kingdoms(console: &mut Console, config: &KingdomConfig) -> Result<Option<(Kingdom, Kingdom)>> {
    println!("Player 1:");
    let Some(name1) = console.text("Enter your kingdom's name: ")? else {
        return Ok(None);
    };
    let Some(king1) = console.text("Enter your king's name: ")? else {
        return Ok(None);
    };
    println!("Player 2:");
    let Some(name2) = console.text("Enter your kingdom's name (e.g., Ironhold): ")? else {
        return Ok(None);
    };
    let Some(king2) = console.text("Enter your king's name: ")? else {
        return Ok(None);
    };
    Ok(Some((
        Kingdom::from_config(name1, king1, config),
        Kingdom::from_config(name2, king2, config),
    )))
}

fn wait(args: &Args, duration: Duration) {
    if args.real_time && !duration.is_zero() {
        thread::sleep(duration);
    }
}

/// Perform one menu entry. `Ok(None)` means input ran out mid-prompt.
fn run_choice(
    choice: u32,
    current: &mut Kingdom,
    other: &mut Kingdom,
    console: &mut Console,
    rng: &mut SimRng,
    args: &Args,
) -> Result<Option<Flow>> {
    match choice {
        1 => {
            let report = current.play_turn(rng);
            print_turn(current.name(), &report);
        }
        2 => {
            let Some(count) = console.number(1, 100, "Enter number of soldiers to train (1-100): ")? else {
                return Ok(None);
            };
            match current.train_army(i64::from(count))? {
                TrainingOutcome::Trained { count, duration, .. } => {
                    println!("Training {} soldiers...", count);
                    wait(args, duration);
                    println!("{}", format!("Trained {} soldiers!", count).green());
                }
                TrainingOutcome::Delayed { turns_remaining } => println!(
                    "{}",
                    format!("Training delayed for {} more turn(s).", turns_remaining).yellow()
                ),
            }
        }
        3 => match current.hold_election(rng) {
            ElectionOutcome::Assassination { king } => println!(
                "{}",
                format!("Assassination! Current king killed, {} takes the throne!", king).red()
            ),
            ElectionOutcome::Rigged { king } => {
                println!("{}", format!("Corrupt election! {} chosen at random.", king).red())
            }
            ElectionOutcome::Vote { king, .. } => {
                println!("{}", format!("Election held! New king: {}", king).green())
            }
        },
        4 => {
            println!("1. Take Loan\n2. Repay Loan\n3. Audit Corruption\n4. Audit Bank\n5. Switch Tax Policy");
            let Some(sub) = console.number(1, 5, "Choose action (1-5): ")? else {
                return Ok(None);
            };
            let action = LoanAction::from_choice(sub)?;
            let amount = if action.needs_amount() {
                match console.number(1, 10_000, "Enter amount (1-10000): ")? {
                    Some(amount) => i64::from(amount),
                    None => return Ok(None),
                }
            } else {
                0
            };
            current.manage_treasury(action, amount)?;
            println!(
                "{}",
                format!(
                    "Done. Gold: {}, Loan: {}, Tax: {}",
                    current.economy().gold(),
                    current.bank().loan(),
                    current.economy().tax_policy()
                )
                .green()
            );
        }
        5 => {
            println!("Resources: Food, Iron, Wood, Stone");
            let Some(resource) = console.text("Enter resource to buy: ")? else {
                return Ok(None);
            };
            let Some(amount) = console.number(1, 1000, "Enter amount to buy (1-1000): ")? else {
                return Ok(None);
            };
            let purchase = current.buy_resource(&resource, i64::from(amount))?;
            println!(
                "{}",
                format!("Bought {} {} for {} gold.", purchase.amount, purchase.resource, purchase.cost).green()
            );
        }
        6 => {
            let prompt = format!("Enter target kingdom (e.g., {}): ", other.name());
            let Some(target) = console.text(&prompt)? else {
                return Ok(None);
            };
            println!("1. Form Alliance\n2. Break Alliance\n3. Form Trade Agreement\n4. Establish Secure Route");
            let Some(sub) = console.number(1, 4, "Choose action (1-4): ")? else {
                return Ok(None);
            };
            let report = current.manage_diplomacy(DiplomacyAction::from_choice(sub)?, &target)?;
            println!("{}", report.to_string().green());
        }
        7 => {
            println!("1. Bribe\n2. Blackmail");
            let Some(sub) = console.number(1, 2, "Choose action (1-2): ")? else {
                return Ok(None);
            };
            let Some(candidate) = console.text("Enter candidate name: ")? else {
                return Ok(None);
            };
            let pressure = Pressure::from_choice(sub)?;
            current.apply_pressure(pressure, &candidate)?;
            println!("{}", format!("Voters leaned on to favor {}.", candidate).yellow());
        }
        8 => {
            let prompt = format!("Enter recipient kingdom (e.g., {}): ", other.name());
            let Some(recipient) = console.text(&prompt)? else {
                return Ok(None);
            };
            let Some(message) = console.text("Enter message: ")? else {
                return Ok(None);
            };
            report_delivery(current.send_message(&recipient, &message), &recipient);
        }
        9 => {
            let prompt = format!("Enter recipient kingdom (e.g., {}): ", other.name());
            let Some(recipient) = console.text(&prompt)? else {
                return Ok(None);
            };
            report_delivery(current.send_fake_trade_request(&recipient), &recipient);
        }
        10 => {
            println!("{}", format!("Messages for {}:", current.name()).yellow());
            for message in current.view_messages(&[&*other]) {
                println!("{}", message);
            }
        }
        11 => {
            let level = current.upgrade_blacksmith()?;
            println!("{}", format!("Blacksmith upgraded to level {}!", level).green());
        }
        12 => {
            let Some(count) = console.number(1, 50, "Enter number of weapons to produce (1-50): ")? else {
                return Ok(None);
            };
            let report = current.produce_weapons(i64::from(count))?;
            println!("Producing {} weapons...", report.produced);
            wait(args, report.duration);
            println!("{}", format!("Produced {} weapons!", report.produced).green());
        }
        13 => {
            println!("1. Spy Mission\n2. Sabotage Weapons\n3. Steal Gold");
            let Some(sub) = console.number(1, 3, "Choose espionage action (1-3): ")? else {
                return Ok(None);
            };
            let mission = Mission::from_choice(sub)?;
            let report = current.conduct_espionage(mission, other, rng)?;
            println!("Sending spies to {}...", report.target);
            wait(args, report.delay);
            match report.outcome {
                MissionOutcome::Intel(status) => {
                    println!("{}", "Spy mission successful! Target status:".green());
                    print!("{}", status);
                }
                MissionOutcome::WeaponsDestroyed(n) => {
                    println!("{}", format!("Sabotage successful! Destroyed {} weapons.", n).green())
                }
                MissionOutcome::GoldStolen(n) => {
                    println!("{}", format!("Theft successful! Stole {} gold.", n).green())
                }
                MissionOutcome::Detected { .. } => {
                    println!("{}", format!("{} failed! Spies detected.", mission).red())
                }
            }
        }
        14 => {
            let report = current.conduct_smuggling(other, rng)?;
            println!("Smuggling goods to {}...", report.target);
            wait(args, report.delay);
            match report.outcome {
                SmugglingOutcome::Delivered { iron_gained, .. } => println!(
                    "{}",
                    format!("Smuggling successful! Gained {} iron.", iron_gained).green()
                ),
                SmugglingOutcome::Seized {
                    penalty,
                    alliance_broken,
                } => {
                    println!(
                        "{}",
                        format!("Smuggling failed! Goods seized, {} gold lost.", penalty).red()
                    );
                    if alliance_broken {
                        println!("{}", format!("{} has broken its alliance.", other.name()).red());
                    }
                }
            }
        }
        15 => {
            println!("1. Build Hospital\n2. Provide Services");
            let Some(sub) = console.number(1, 2, "Choose healthcare action (1-2): ")? else {
                return Ok(None);
            };
            match HealthcareAction::from_choice(sub)? {
                HealthcareAction::BuildHospital => {
                    let report = current.build_hospital()?;
                    println!("Building hospital...");
                    wait(args, report.duration);
                    println!("{}", format!("Hospital built! Healthcare level: {}", report.level).green());
                }
                HealthcareAction::ProvideServices => {
                    let boost = current.provide_healthcare();
                    println!("{}", format!("Healthcare services raise morale by {}.", boost).green());
                }
            }
        }
        16 => {
            println!("1. Build Barracks");
            let Some(sub) = console.number(1, 1, "Choose building action (1): ")? else {
                return Ok(None);
            };
            match BuildingAction::from_choice(sub)? {
                BuildingAction::BuildBarracks => {
                    let report = current.build_barracks()?;
                    println!("Building barracks...");
                    wait(args, report.duration);
                    println!("{}", format!("Barracks built! Level: {}", report.level).green());
                }
            }
        }
        17 => {
            persistence::save_state(current, &args.save_file)?;
            println!("{}", format!("Game state saved for {}!", current.name()).green());
        }
        18 => match persistence::load_state(current.name(), &args.save_file)? {
            LoadOutcome::Found => println!("{}", format!("Game state found for {}!", current.name()).green()),
            LoadOutcome::NotFound => println!(
                "{}",
                format!("No saved state for {} in that file.", current.name()).yellow()
            ),
            LoadOutcome::NoSaveFile => println!(
                "{}",
                format!("No save file found for {}. Starting new game.", current.name()).yellow()
            ),
        },
        19 => {
            persistence::save_score(current, &args.score_file)?;
            println!(
                "{}",
                format!("Score saved to {} for {}!", args.score_file.display(), current.name()).green()
            );
        }
        _ => return Ok(Some(Flow::Exit)),
    }
    Ok(Some(Flow::Continue))
}

fn report_delivery(sent: bool, recipient: &str) {
    if sent {
        println!("{}", format!("Message sent to {}.", recipient).green());
    } else {
        println!("{}", "Message limit reached.".red());
    }
}

fn print_turn(name: &str, report: &TurnReport) {
    println!("{}", format!("=== Turn {} in {} ===", report.turn, name).bold());
    for event in &report.events {
        let line = event.to_string();
        if event.is_adverse() {
            println!("{}", line.red());
        } else {
            println!("{}", line.green());
        }
    }
    for warning in &report.warnings {
        println!("{}", format!("Warning: {}", warning).red());
    }
}
