use std::sync::Arc;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use ladders::{
    BroadcastChannel, GameStatus, Identity, MemoryBroadcastChannel, MemoryRoomStore, RoomClient,
    RoomStore,
};

/// Turn cap per game; a two-player game typically finishes well under 100.
const MAX_TURNS: u32 = 2000;

#[derive(Debug, Parser)]
#[command(name = "simulate")]
#[command(about = "Drive simulated clients through full snakes-and-ladders games", long_about = None)]
struct Args {
    /// Players per game (2-6)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Number of games to play
    #[arg(short = 'n', long = "num_games", default_value_t = 1)]
    num_games: u32,

    /// Seed for deterministic dice
    #[arg(long)]
    seed: Option<u64>,

    /// Room code prefix
    #[arg(long, default_value = "SIM")]
    room: String,

    /// Print per-turn detail
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if !(2..=6).contains(&args.players) {
        eprintln!("players must be between 2 and 6");
        std::process::exit(1);
    }

    println!("🎮 Snakes & Ladders Simulation");
    println!("==============================");
    println!("Configuration:");
    println!("  - Players: {}", args.players);
    println!("  - Number of games: {}", args.num_games);
    match args.seed {
        Some(seed) => println!("  - Seed: {}", seed),
        None => println!("  - Seed: random"),
    }

    let mut wins: Vec<u32> = vec![0; args.players];
    let mut total_turns: u64 = 0;
    let mut completed_games = 0u32;

    for game_num in 0..args.num_games {
        if args.num_games > 1 {
            println!("\n🎯 Game {} of {}", game_num + 1, args.num_games);
        }

        let mut rng = match args.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed.wrapping_add(game_num as u64)),
            None => XorShiftRng::from_entropy(),
        };

        match simulate_single_game(&args, game_num, &mut rng).await {
            Some((winner_seat, turns)) => {
                wins[winner_seat] += 1;
                total_turns += turns as u64;
                completed_games += 1;
                println!("✅ Player {} won in {} turns", winner_seat + 1, turns);
            }
            None => {
                println!("❌ Game did not complete");
            }
        }
    }

    if args.num_games > 1 {
        println!("\n📊 Results:");
        println!("==========");
        for (seat, &win_count) in wins.iter().enumerate() {
            let win_rate = if completed_games > 0 {
                (win_count as f64 / completed_games as f64) * 100.0
            } else {
                0.0
            };
            println!("Player {}: {} wins ({:.1}%)", seat + 1, win_count, win_rate);
        }
        println!("Completed games: {}/{}", completed_games, args.num_games);
        if completed_games > 0 {
            println!(
                "Average turns per game: {:.1}",
                total_turns as f64 / completed_games as f64
            );
        }
    }
}

/// Run one full game over fresh in-memory transports. Returns the winning
/// seat and the number of turns taken.
async fn simulate_single_game(
    args: &Args,
    game_num: u32,
    rng: &mut XorShiftRng,
) -> Option<(usize, u32)> {
    let store: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::new());
    let channel: Arc<dyn BroadcastChannel> = Arc::new(MemoryBroadcastChannel::new());
    let room = format!("{}{:03}", args.room, game_num + 1);

    // Bind one client per seat; each join is committed and echoed
    let mut clients: Vec<RoomClient> = Vec::with_capacity(args.players);
    for seat in 0..args.players {
        let identity = Identity::generate(format!("Player {}", seat + 1));
        match RoomClient::bind(store.clone(), channel.clone(), identity, room.clone()).await {
            Ok(client) => clients.push(client),
            Err(e) => {
                println!("❌ Bind failed for seat {}: {}", seat + 1, e);
                return None;
            }
        }
    }

    // Everyone pumps echoes until they see the full roster
    for client in clients.iter_mut() {
        while client.state().players.len() < args.players {
            client.next_update().await?;
        }
    }

    match clients[0].start_game().await {
        Ok(true) => {}
        Ok(false) => {
            println!("❌ Start denied in room {}", room);
            return None;
        }
        Err(e) => {
            println!("❌ Start failed: {}", e);
            return None;
        }
    }
    for client in clients.iter_mut() {
        while client.state().game_status != GameStatus::Playing {
            client.next_update().await?;
        }
    }

    if args.verbose {
        println!("🏁 Room {} started with {} players", room, args.players);
    }

    let mut turns = 0u32;
    while turns < MAX_TURNS {
        // Views are converged after each round, so exactly one client
        // believes it is their turn
        let seat = clients.iter().position(|c| c.is_my_turn())?;

        let roll = rng.gen_range(1..=6);
        match clients[seat].submit_roll(roll).await {
            Ok(true) => {}
            Ok(false) => {
                println!("❌ Roll denied for seat {}", seat + 1);
                return None;
            }
            Err(e) => {
                println!("❌ Roll failed: {}", e);
                return None;
            }
        }
        turns += 1;

        for client in clients.iter_mut() {
            client.next_update().await?;
        }

        if args.verbose {
            let state = clients[seat].state();
            let mover = &state.players[seat];
            println!(
                "  Turn {}: {} rolled {} -> cell {}",
                turns, mover.name, roll, mover.position
            );
        }

        let state = clients[seat].state();
        if state.game_status == GameStatus::Finished {
            let winner_id = state.winner.clone()?;
            let winner_seat = state.players.iter().position(|p| p.id == winner_id)?;
            if args.verbose {
                println!("🏆 {} wins room {}", state.players[winner_seat].name, room);
            }
            return Some((winner_seat, turns));
        }
    }

    println!("⏰ Room {} hit the {} turn limit", room, MAX_TURNS);
    None
}
