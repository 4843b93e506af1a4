extern crate frozen_lake;

use frozen_lake::*;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = FrozenLakeConfig::default()
        .with_map_size(8)
        .with_frozen_p(0.8)
        .with_observation_mode(ObservationMode::HoleMaskAndGoalDirection)
        .with_seed(2718);
    let mut env = FrozenLake::new(&config)?;
    println!("{}\n", env.grid());
    println!("observation space:\n{:?}\n", env.observation_space());

    let table = serde_json::to_string(&*env.transitions())?;
    println!("transition table: {} bytes of json\n", table.len());

    let mut policy = RandomPolicy::new(Some(2718));
    let episodes = (0..1000)
        .map(|i| run_episode(&mut env, &mut policy, 200, Some(i)))
        .collect::<Vec<_>>();
    let wins = episodes.iter().filter(|ep| ep.total_reward() > 0.).count();
    let mean_len =
        episodes.iter().map(|ep| ep.len()).sum::<usize>() as f64 / episodes.len() as f64;
    println!("random agent: {wins}/1000 goals, mean length {mean_len:.1}");

    let frame = Renderer::new(RenderMode::RgbArray).render(&env)?;
    if let Some(image) = frame.and_then(|f| f.to_image()) {
        image.save("frozen_lake.png")?;
        println!("last frame written to frozen_lake.png");
    }

    Ok(())
}
