#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::{info, warn};
#[cfg(feature = "std")]
use tokio::time::Duration;
#[cfg(feature = "std")]
use warships::{
    build_fleet,
    cli::{
        menu::{print_menu, print_stats_table, waiting_opponents},
        parse_choice, LineReader, MenuChoice, StdinPlacement, StdinTargets, TerminalDisplay,
    },
    init_logging, AutoTargeter, ClientConfig, Coord, GameService, HttpService, LocalReferee,
    MatchDriver, MatchEnd, MatchRequest, Outcome, Profile, Resilient, Session, TargetInput,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(long, help = "Base URL of the game service")]
    url: Option<String>,
    #[arg(long, help = "HTTP request timeout in seconds")]
    timeout_secs: Option<u64>,
    #[arg(long, help = "Attempts per request before giving up")]
    retries: Option<u32>,
    #[arg(long, help = "Pause between attempts in milliseconds")]
    retry_delay_ms: Option<u64>,
    #[arg(long, default_value = "")]
    nick: String,
    #[arg(long, default_value = "")]
    desc: String,
    #[arg(long, help = "Let the computer pick targets")]
    auto: bool,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play one match against a local bot, no network needed.
    Demo {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.url {
            config.server_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = self.retries {
            config.retry_attempts = retries;
        }
        if let Some(ms) = self.retry_delay_ms {
            config.retry_delay = Duration::from_millis(ms);
        }
        config
    }

    fn profile(&self) -> Profile {
        Profile {
            nick: self.nick.clone(),
            description: self.desc.clone(),
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.config();

    match &cli.command {
        Some(Commands::Demo { seed }) => {
            let seed = *seed;
            let referee = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    LocalReferee::seeded(s)
                }
                None => LocalReferee::new(),
            };
            let service: Arc<dyn GameService> = Arc::new(referee);
            let input = match seed {
                Some(s) => AutoTargeter::seeded(s.wrapping_add(1)),
                None => AutoTargeter::new(),
            };
            let mut input = input.with_delay(Duration::from_millis(200));
            let nick = if cli.nick.is_empty() { "demo".to_string() } else { cli.nick.clone() };
            let req = MatchRequest {
                nick,
                description: cli.desc.clone(),
                vs_bot: true,
                ..MatchRequest::default()
            };
            let end = run_match(service, cli.profile(), &req, &mut input, &config).await?;
            report(end);
        }
        None => {
            let http = HttpService::with_timeout(config.server_url.clone(), config.request_timeout)?;
            let service: Arc<dyn GameService> = Arc::new(Resilient::new(http, config.retry_policy()));
            info!("using game service at {}", config.server_url);
            menu_loop(service, &cli, &config).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn menu_loop(service: Arc<dyn GameService>, cli: &Cli, config: &ClientConfig) -> anyhow::Result<()> {
    let mut lines = LineReader::spawn();
    let profile = cli.profile();
    let mut fleet: Option<Vec<Coord>> = None;

    loop {
        print_menu(fleet.is_some());
        let Some(line) = lines.prompt("> ").await else {
            break;
        };
        let Some(choice) = parse_choice(&line) else {
            println!("Unknown choice {:?}.", line);
            continue;
        };
        let mut req = MatchRequest {
            fleet: fleet.clone(),
            description: profile.description.clone(),
            nick: profile.nick.clone(),
            ..MatchRequest::default()
        };
        match choice {
            MenuChoice::PlayBot => req.vs_bot = true,
            MenuChoice::ChallengePlayer => {
                let waiting = match service.waiting_players().await {
                    Ok(list) => waiting_opponents(&list, &profile.nick),
                    Err(e) => {
                        println!("Could not fetch waiting players: {:#}", e);
                        continue;
                    }
                };
                if waiting.is_empty() {
                    println!("Nobody is waiting right now.");
                    continue;
                }
                for (i, nick) in waiting.iter().enumerate() {
                    println!("  {}) {}", i + 1, nick);
                }
                let Some(pick) = lines.prompt("Opponent number: ").await else {
                    break;
                };
                match pick.parse::<usize>().ok().and_then(|n| waiting.get(n.wrapping_sub(1))) {
                    Some(nick) => req.opponent_nick = Some(nick.clone()),
                    None => {
                        println!("No such player.");
                        continue;
                    }
                }
            }
            MenuChoice::WaitForChallenge => {}
            MenuChoice::Leaderboard => {
                match service.leaderboard().await {
                    Ok(mut stats) => {
                        stats.truncate(10);
                        print_stats_table(&stats);
                    }
                    Err(e) => println!("Could not fetch the leaderboard: {:#}", e),
                }
                continue;
            }
            MenuChoice::OwnStats => {
                if profile.nick.is_empty() {
                    println!("Start with --nick to look up your statistics.");
                    continue;
                }
                match service.player_stats(&profile.nick).await {
                    Ok(stats) => print_stats_table(std::slice::from_ref(&stats)),
                    Err(e) => println!("Could not fetch statistics: {:#}", e),
                }
                continue;
            }
            MenuChoice::SetUpFleet => {
                fleet = build_fleet(&mut StdinPlacement::new(&mut lines)).await;
                if fleet.is_none() {
                    println!("Fleet discarded, the server will place your ships.");
                }
                continue;
            }
            MenuChoice::Quit => break,
        }

        let result = if cli.auto {
            let mut input = AutoTargeter::new().with_delay(Duration::from_millis(300));
            run_match(service.clone(), profile.clone(), &req, &mut input, config).await
        } else {
            let mut input = StdinTargets::new(&mut lines);
            run_match(service.clone(), profile.clone(), &req, &mut input, config).await
        };
        match result {
            Ok(end) => report(end),
            Err(e) => println!("Match failed: {:#}", e),
        }
    }
    Ok(())
}

/// Play one match, leaving it if Ctrl+C arrives first.
#[cfg(feature = "std")]
async fn run_match(
    service: Arc<dyn GameService>,
    profile: Profile,
    req: &MatchRequest,
    input: &mut dyn TargetInput,
    config: &ClientConfig,
) -> anyhow::Result<MatchEnd> {
    let mut display = TerminalDisplay::new();
    let mut driver = MatchDriver::new(service, Session::new(profile), input, &mut display)
        .with_poll_interval(config.poll_interval);
    let shutdown = driver.shutdown_handle();

    let play = driver.play(req);
    tokio::pin!(play);
    tokio::select! {
        res = &mut play => return res,
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                warn!("cannot listen for Ctrl+C: {}", e);
            } else {
                info!("interrupted, leaving the match");
                shutdown.cancel();
            }
        }
    }
    play.await
}

#[cfg(feature = "std")]
fn report(end: MatchEnd) {
    match end {
        MatchEnd::Finished(Outcome::Won) => println!("Victory!"),
        MatchEnd::Finished(Outcome::Lost) => println!("Defeat."),
        MatchEnd::Abandoned => println!("You left the match."),
    }
}
