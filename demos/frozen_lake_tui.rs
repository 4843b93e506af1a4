extern crate frozen_lake;
extern crate serde_json;

use frozen_lake::*;
use serde_json::to_value;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = FrozenLakeConfig::from_kwargs(&[
        ("render_mode", to_value("human")?),
        ("map_name", to_value("8x8")?),
        ("is_slippery", to_value(true)?),
        ("render_fps", to_value(20)?),
        //("desc", to_value(["SHHH", "FHHH", "FHHF", "FFFG"])?),
    ])?;
    let mut env = FrozenLake::new(&config)?;
    let mut renderer = config
        .renderer()
        .unwrap_or_else(|| Renderer::new(RenderMode::Human));

    println!("observation space:\n{:?}\n", env.observation_space());
    println!("action space:\n{:?}\n", env.action_space());
    if let Some(ts) = env.transitions().get(14, Action::Right) {
        println!("transitions from 14 going right:\n{:?}\n", ts);
    }

    let mut policy = RandomPolicy::new(None);
    for ep in 0..100 {
        let (mut obs, _) = env.reset_with_info(Some(2718 + ep));
        let mut tot_reward = 0.;
        loop {
            let action = policy.policy(&obs);
            let state = env.step(action);
            renderer.render(&env)?;
            tot_reward += state.reward;
            obs = state.observation;

            if state.truncated || state.terminated {
                break;
            }
        }
        println!("Finished episode {} with total reward {}", ep, tot_reward);
    }

    renderer.close()
}
