//! Minimal single-play demo client: creates a game over HTTP, connects
//! to its WebSocket as the human seat, starts the hand, and auto-plays
//! CHECK/CALL whenever it is prompted with a legal action — useful for
//! exercising the session layer end to end without a browser.

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[tokio::main]
async fn main() {
    let base_url =
        std::env::args().nth(1).unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    let username = std::env::args().nth(2).unwrap_or_else(|| "demo-player".to_string());

    let http = reqwest::Client::new();
    let create: Value = http
        .post(format!("{base_url}/api/games/single-play"))
        .json(&json!({ "big_blind": 20, "buy_in": 2000 }))
        .send()
        .await
        .expect("create_single_play request failed")
        .json()
        .await
        .expect("response was not valid JSON");

    let game_id = create["game_id"].as_str().expect("game_id in response").to_string();
    println!("created game {game_id}");

    let ws_url = format!(
        "{}/ws/game/{game_id}?username={username}",
        base_url.replacen("http", "ws", 1)
    );
    let (mut socket, _response) = connect_async(ws_url).await.expect("websocket connect failed");

    let start = json!({ "type": "start_game" });
    socket
        .send(Message::Text(start.to_string()))
        .await
        .expect("failed to send start_game");

    let mut turns_played = 0;
    while let Some(message) = socket.next().await {
        let text = match message.expect("websocket error") {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        println!("<- {text}");

        let Ok(envelope) = serde_json::from_str::<Value>(&text) else {
            continue;
        };
        if envelope["type"] != "game_state" {
            continue;
        }
        let valid_actions = envelope["data"]["valid_actions"].as_array();
        let Some(actions) = valid_actions.filter(|a| !a.is_empty()) else {
            continue;
        };

        let action_kind = if actions.iter().any(|a| a["action_type"] == "Check") {
            "CHECK"
        } else {
            "CALL"
        };
        let reply = json!({ "type": "player_action", "action": action_kind });
        socket
            .send(Message::Text(reply.to_string()))
            .await
            .expect("failed to send player_action");

        turns_played += 1;
        if turns_played >= 50 {
            break;
        }
    }
}
