//! Simple graph: node_1 then a coin flip between node_2 ("happy") and node_3 ("sad").
//!
//! Run: `cargo run -p skein-examples --example simple_graph -- "Hi, this is Lance."`

use env_config::load_settings;
use rand::Rng;
use skein::generate_mermaid;
use skein_examples::mood::{mood_graph, Mood, MoodState};
use skein_examples::{init_logging, APP_NAME};

fn decide_mood(_state: &MoodState) -> Mood {
    if rand::thread_rng().gen_bool(0.5) {
        Mood::Happy
    } else {
        Mood::Sad
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(APP_NAME, None)?;
    init_logging(&settings)?;

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hi, this is Lance.".to_string());

    let compiled = mood_graph(decide_mood)?;
    println!("{}", generate_mermaid(&compiled));

    let state = compiled.invoke(MoodState { graph_state: input })?;
    println!("{}", state.graph_state);
    Ok(())
}
