use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use futures::stream::StreamExt;
use futures::SinkExt;
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use pose_stage::config::Config;
use pose_stage::engine::assets::FrameLoader;
use pose_stage::engine::tick::TickLoop;
use pose_stage::game::character::{AnimationLabel, Character, PoseLabel};
use pose_stage::game::scene::{SceneContext, SceneEvent};
use pose_stage::relay::Envelope;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "stage.toml".to_string());
    let config = Config::load(&config_path)?;

    info!("Starting stage...");

    // Load the sprite frames (dimensions only; image data stays on disk
    // for whatever renders the stage)
    let loader = FrameLoader::new(&config.stage.asset_dir);
    let labels: Vec<&str> = AnimationLabel::ALL.iter().map(|l| l.as_str()).collect();
    let frames = loader.load_set(&labels)?;

    let character = Character::new(
        config.stage.spawn_x,
        config.stage.spawn_y,
        config.stage.scale,
        frames,
    )
    .with_world(config.scene.world());
    let mut scene = SceneContext::new(character, config.scene.barriers()?)
        .with_debug(config.stage.debug_overlay);

    // Connect to the relay on a background thread; pose labels come in,
    // collision reports go out
    let relay_url = if config.stage.relay_url.is_empty() {
        config.relay.ws_url()
    } else {
        config.stage.relay_url.clone()
    };
    let (incoming_tx, incoming_rx) = mpsc::channel::<Envelope>();
    let (outgoing_tx, outgoing_rx) = tokio::sync::mpsc::unbounded_channel::<Envelope>();
    spawn_relay_client(relay_url, incoming_tx, outgoing_rx);

    info!("Stage running at 60 ticks/s");

    let mut tick_loop = TickLoop::new();
    loop {
        // Apply every pose label that arrived since the last frame
        for envelope in incoming_rx.try_iter() {
            let Some(label) = envelope.label() else {
                continue;
            };
            match PoseLabel::parse(label) {
                Some(pose) => scene.on_pose(pose),
                None => warn!("ignoring unknown pose label '{label}'"),
            }
        }

        let ticks = tick_loop.begin_frame();
        for _ in 0..ticks {
            for event in scene.tick() {
                let SceneEvent::CollisionImpact { role } = event;
                let _ = outgoing_tx.send(Envelope::collision(role.as_str()));
            }
        }

        // Once a second, report where the character is
        if ticks > 0 && tick_loop.tick_count() % 60 < ticks as u64 {
            let character = scene.character();
            debug!(
                "tick {}: pos ({:.1}, {:.1}) {} [{:?}]",
                tick_loop.tick_count(),
                character.position().x,
                character.position().y,
                character.animation().current().as_str(),
                character.motion(),
            );
        }

        thread::sleep(Duration::from_millis(2));
    }
}

/// Run the WebSocket client on its own thread with a private runtime,
/// reconnecting whenever the relay goes away
fn spawn_relay_client(
    url: String,
    incoming: mpsc::Sender<Envelope>,
    outgoing: UnboundedReceiver<Envelope>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("failed to start relay client runtime: {e}");
                return;
            }
        };
        runtime.block_on(relay_client(url, incoming, outgoing));
    });
}

async fn relay_client(
    url: String,
    incoming: mpsc::Sender<Envelope>,
    mut outgoing: UnboundedReceiver<Envelope>,
) {
    loop {
        let (socket, _) = match connect_async(url.as_str()).await {
            Ok(connection) => connection,
            Err(e) => {
                warn!("relay connection to {url} failed: {e}");
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };
        info!("connected to relay at {url}");
        let (mut write, mut read) = socket.split();

        loop {
            tokio::select! {
                message = read.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<Envelope>(&text) {
                            Ok(envelope) => {
                                // The stage shut down
                                if incoming.send(envelope).is_err() {
                                    return;
                                }
                            }
                            Err(e) => warn!("dropping malformed relay frame: {e}"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("relay socket error: {e}");
                        break;
                    }
                },
                report = outgoing.recv() => match report {
                    Some(envelope) => {
                        let Ok(json) = serde_json::to_string(&envelope) else {
                            continue;
                        };
                        if write.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    None => return,
                },
            }
        }

        warn!("relay connection lost, reconnecting");
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}
