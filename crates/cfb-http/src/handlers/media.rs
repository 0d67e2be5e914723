use axum::extract::State;

use cfb_core::chatfuel::{AttachmentType, Message, Response};

use crate::{handlers::{reply, Reply}, router::AppState};

/// POST /image-attachment
pub async fn send_image(State(state): State<AppState>) -> Reply {
    send_attachment(&state, AttachmentType::Image, "image.png")
}

/// POST /video-attachment
pub async fn send_video(State(state): State<AppState>) -> Reply {
    send_attachment(&state, AttachmentType::Video, "video.mp4")
}

/// POST /audio-attachment
pub async fn send_audio(State(state): State<AppState>) -> Reply {
    send_attachment(&state, AttachmentType::Audio, "audio.mp3")
}

fn send_attachment(state: &AppState, kind: AttachmentType, file: &str) -> Reply {
    let url = state.cfg.media_url(file);
    tracing::info!(kind = %kind, url = %url, "building attachment response");

    let message = Message::new().attach(kind, url)?;
    reply(Response::create(Some(vec![message]))?)
}
