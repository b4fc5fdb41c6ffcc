use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::ai::ContentProvider;
use crate::error::{ContentError, MediaError};
use crate::logger;
use crate::media::IllustrationSource;
use crate::models::{WorkerRequest, WorkerResponse};

#[derive(Debug, Clone, Copy)]
pub struct WorkerTimeouts {
    pub content: Duration,
    pub media: Duration,
}

/// Run content and illustration requests off the UI thread.
///
/// Requests are handled one at a time on a single tokio runtime owned by the
/// worker thread. The thread exits when the request channel disconnects.
pub fn spawn_worker(
    provider: Arc<dyn ContentProvider>,
    illustrations: Arc<dyn IllustrationSource>,
    timeouts: WorkerTimeouts,
    tx: Sender<WorkerResponse>,
    rx: Receiver<WorkerRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("zoo-spell-quest::worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Worker failed to start runtime: {}", e));
                    fail_all(&tx, &rx, &e.to_string());
                    return;
                }
            };

            while let Ok(request) = rx.recv() {
                let response = rt.block_on(handle_request(
                    provider.as_ref(),
                    illustrations.as_ref(),
                    timeouts,
                    request,
                ));
                if tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("Worker channel disconnected, exiting");
        })
}

async fn handle_request(
    provider: &dyn ContentProvider,
    illustrations: &dyn IllustrationSource,
    timeouts: WorkerTimeouts,
    request: WorkerRequest,
) -> WorkerResponse {
    match request {
        WorkerRequest::GenerateQuiz { request_id, count } => {
            logger::log(&format!(
                "Worker received quiz request {} for {} questions",
                request_id, count
            ));
            let result = tokio::time::timeout(timeouts.content, provider.generate_quiz(count))
                .await
                .unwrap_or(Err(ContentError::TimedOut(timeouts.content)));

            match result {
                Ok(questions) => {
                    logger::log(&format!(
                        "Worker sending {} questions for request {}",
                        questions.len(),
                        request_id
                    ));
                    WorkerResponse::QuizReady {
                        request_id,
                        questions,
                    }
                }
                Err(error) => {
                    logger::log(&format!("Worker error: {}", error));
                    WorkerResponse::QuizFailed { request_id, error }
                }
            }
        }
        WorkerRequest::LoadIllustration { key, url } => {
            let result = tokio::time::timeout(timeouts.media, illustrations.fetch(&url))
                .await
                .unwrap_or(Err(MediaError::TimedOut(timeouts.media)));

            match result {
                Ok(()) => WorkerResponse::IllustrationLoaded { key },
                Err(e) => {
                    logger::log(&format!("Illustration failed for {}: {}", url, e));
                    WorkerResponse::IllustrationFailed {
                        key,
                        error: e.to_string(),
                    }
                }
            }
        }
    }
}

/// Without a runtime nothing can be served; answer every request with a failure.
fn fail_all(tx: &Sender<WorkerResponse>, rx: &Receiver<WorkerRequest>, reason: &str) {
    while let Ok(request) = rx.recv() {
        let response = match request {
            WorkerRequest::GenerateQuiz { request_id, .. } => WorkerResponse::QuizFailed {
                request_id,
                error: ContentError::WorkerUnavailable,
            },
            WorkerRequest::LoadIllustration { key, .. } => WorkerResponse::IllustrationFailed {
                key,
                error: reason.to_string(),
            },
        };
        if tx.send(response).is_err() {
            break;
        }
    }
}
