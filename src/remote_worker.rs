use crate::config::Config;
use crate::logger;
use crate::models::{RemoteRequest, RemoteResponse};
use crate::supabase::SupabaseClient;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Background thread owning the HTTP client and a tokio runtime. Requests
/// arrive over the channel, responses flow back; the response channel doubles
/// as the auth-state-change feed for the UI loop.
pub fn spawn_remote_worker(
    config: Config,
    response_tx: Sender<RemoteResponse>,
    request_rx: Receiver<RemoteRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("jlpt-flashcards::remote_worker".to_string())
        .spawn(move || {
            let client = SupabaseClient::new(&config);
            let rt = tokio::runtime::Runtime::new().unwrap();

            loop {
                match request_rx.recv() {
                    Ok(request) => {
                        let response = rt.block_on(handle_request(&client, request));
                        if response_tx.send(response).is_err() {
                            // UI side hung up
                            break;
                        }
                    }
                    Err(_) => {
                        logger::log("Worker channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn remote worker thread")
}

async fn handle_request(client: &SupabaseClient, request: RemoteRequest) -> RemoteResponse {
    match request {
        RemoteRequest::SignIn { email, password } => {
            logger::log(&format!("Worker: sign-in for {}", email));
            RemoteResponse::SignedIn {
                result: client.sign_in(&email, &password).await,
            }
        }
        RemoteRequest::SignUp { email, password } => {
            logger::log(&format!("Worker: sign-up for {}", email));
            RemoteResponse::SignedUp {
                result: client.sign_up(&email, &password).await,
            }
        }
        RemoteRequest::SignOut { access_token } => {
            // the session is torn down locally whatever the service says
            if let Err(e) = client.sign_out(&access_token).await {
                logger::log(&format!("Worker: sign-out error ignored: {}", e));
            }
            RemoteResponse::SignedOut
        }
        RemoteRequest::FetchDeck {
            request_id,
            session,
        } => {
            logger::log(&format!("Worker: deck fetch #{}", request_id));
            RemoteResponse::DeckFetched {
                request_id,
                result: client.fetch_user_deck(&session).await,
            }
        }
        RemoteRequest::InsertCard { card, session } => {
            logger::log(&format!("Worker: insert card {}", card.japanese));
            RemoteResponse::CardInserted {
                result: client.insert_flashcard(&session, &card).await,
            }
        }
    }
}
