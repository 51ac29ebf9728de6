// End-to-end session flow: scripted capture through the proxy layer
//
// Wires the recorder and chat session to a running proxy whose speech-to-
// text upstream is down (masked) and whose assistant upstream is live.

use axum::response::Json as ResponseJson;
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use serde_json::{json, Value};
use storysketch::config::{
    Config, HttpConfig, ServiceConfig, TranscriptionConfig, UpstreamConfig,
};
use storysketch::http::SIMULATED_TRANSCRIPT;
use storysketch::{
    create_router, AppState, ChatSession, InputKind, OutputKind, ProxyClient, Recorder,
    RecorderState, Role, ScriptedCapture,
};

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_record_transcribe_and_submit_through_proxy() {
    // Assistant upstream echoes a reply; STT upstream is unreachable
    let chat_upstream = Router::new().route(
        "/api/v1/chats",
        post(|Json(body): Json<Value>| async move {
            let message = body["message"].as_str().unwrap_or_default();
            ResponseJson(json!({ "response": format!("You said: {}", message) }))
        }),
    );
    let chat_url = format!("{}/api/v1/chats", spawn_server(chat_upstream).await);

    let cfg = Config {
        service: ServiceConfig {
            name: "storysketch-test".to_string(),
            http: HttpConfig {
                bind: "127.0.0.1".to_string(),
                port: 0,
            },
        },
        upstream: UpstreamConfig {
            chat_url,
            transcribe_url: dead_endpoint().await,
        },
        transcription: TranscriptionConfig {
            mask_upstream_failures: true,
        },
    };
    let proxy_url = spawn_server(create_router(AppState::new(cfg))).await;
    let client = ProxyClient::new(proxy_url);

    // Record a clip and transcribe it through the proxy
    let mut recorder = Recorder::new();
    let capture = ScriptedCapture::new(vec![Bytes::from_static(b"fake-mp3-data")]);
    recorder.start(Box::new(capture)).await.unwrap();
    recorder.stop().await.unwrap();
    recorder.transcribe(&client).await;

    assert_eq!(recorder.state(), RecorderState::Transcribed);
    assert_eq!(recorder.transcript_text(), Some(SIMULATED_TRANSCRIPT));

    // "Use This Text": inject the transcript and send it
    let mut session = ChatSession::new(InputKind::Voice, OutputKind::Storybook);
    let transcript = recorder.use_text().unwrap().to_string();
    session.submit_transcript(&transcript, &client).await;

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, SIMULATED_TRANSCRIPT);
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(
        messages[2].content,
        format!("You said: {}", SIMULATED_TRANSCRIPT)
    );
}
