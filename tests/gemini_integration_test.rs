use lumiere::{Config, ReqwestTransport};
use lumiere_common::{GeminiClient, ImageCaption, DEFAULT_BIO_TONE};
use std::time::Duration;

// 1x1の白PNG
const WHITE_PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAIAAACQd1PeAAAADElEQVR4nGP4//8/AAX+Av4N70a4AAAAAElFTkSuQmCC";

fn live_client() -> Option<GeminiClient<ReqwestTransport>> {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return None;
        }
    };
    let config = Config::default();
    let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_seconds))
        .expect("http client");
    Some(GeminiClient::new(Some(api_key), transport))
}

#[tokio::test]
async fn gemini_bio_integration() {
    let Some(client) = live_client() else {
        return;
    };

    let bio = client
        .generate_bio("I take pictures of buildings in Paris at night.", DEFAULT_BIO_TONE)
        .await
        .expect("bio request failed");
    assert!(!bio.trim().is_empty());
}

#[tokio::test]
async fn gemini_caption_integration() {
    let Some(client) = live_client() else {
        return;
    };

    let caption = client.generate_image_caption(WHITE_PIXEL).await;
    assert_ne!(caption, ImageCaption::unavailable(), "caption fell back");
    assert!(!caption.title.is_empty());
}

#[tokio::test]
async fn gemini_rejects_invalid_key() {
    let transport = ReqwestTransport::new(Duration::from_secs(30)).expect("http client");
    let client = GeminiClient::new(Some("invalid-key".into()), transport);

    if std::env::var("GEMINI_API_KEY").is_err() {
        eprintln!("GEMINI_API_KEY not set; skipping integration test");
        return;
    }

    let result = client.generate_bio("bio", DEFAULT_BIO_TONE).await;
    assert!(result.is_err());
}
