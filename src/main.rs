/*
 * Shattering Glass Demo
 *
 * A nannou window showing a screen covered by a pane of glass. Breaking the
 * glass splits the snapshot into a grid of small shards that fall away under
 * randomized gravity, bouncing off the side edges, revealing the screen below.
 *
 * Logging is controlled through RUST_LOG (default: shatterglass=info).
 */

use shatterglass::app;
use tracing::info;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "shatterglass=info".to_string()),
        )
        .init();

    info!("Starting shatterglass demo");

    nannou::app(app::model).update(app::update).run();
}
