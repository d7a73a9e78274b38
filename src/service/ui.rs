//! HTTP hand-off to the presentation layer
//!
//! Reads are served from the last published [`ListingSnapshot`]. Writes
//! never touch listing state directly: they only append events to the log.
use super::*;
use crate::{
    filter::FilterEdit,
    listing::{DetailSnapshot, ListingSnapshot, ListingView},
    vehicle::VehicleId,
};
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use futures::FutureExt;
use parking_lot::RwLock;
use std::net::SocketAddr;
use tokio::{runtime::Runtime, sync::oneshot};

/// Latest listing snapshot, written by the listing service only
#[derive(Default)]
pub struct ViewStore(RwLock<Option<ListingSnapshot>>);

pub type SharedViewStore = Arc<ViewStore>;

impl ViewStore {
    pub fn new_shared() -> SharedViewStore {
        Arc::new(Self::default())
    }

    pub fn publish(&self, snapshot: ListingSnapshot) {
        *self.0.write() = Some(snapshot);
    }

    pub fn view(&self) -> Option<ListingView> {
        self.0.read().as_ref().map(|snapshot| snapshot.view.clone())
    }

    pub fn detail(&self, id: VehicleId) -> Option<DetailSnapshot> {
        self.0.read().as_ref().and_then(|snapshot| snapshot.detail(id))
    }
}

#[derive(Clone)]
struct AppState {
    event_writer: event_log::SharedWriter,
    view_store: SharedViewStore,
}

impl AppState {
    fn submit(&self, event: Event) -> StatusCode {
        match self.event_writer.write(&[event]) {
            Ok(_) => StatusCode::ACCEPTED,
            Err(e) => {
                error!(error = ?e, "failed to log event");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

async fn get_vehicles(State(app): State<AppState>) -> Result<Json<ListingView>, StatusCode> {
    app.view_store
        .view()
        .map(Json)
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

async fn get_vehicle(
    State(app): State<AppState>,
    Path(id): Path<VehicleId>,
) -> Result<Json<DetailSnapshot>, StatusCode> {
    app.view_store
        .detail(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn post_filter(State(app): State<AppState>, Json(edit): Json<FilterEdit>) -> StatusCode {
    app.submit(Event::FilterEdited(edit))
}

async fn post_reset(State(app): State<AppState>) -> StatusCode {
    app.submit(Event::FiltersReset)
}

async fn post_toggle_favourite(
    State(app): State<AppState>,
    Path(id): Path<VehicleId>,
) -> StatusCode {
    app.submit(Event::FavouriteToggled(id))
}

pub fn router(event_writer: event_log::SharedWriter, view_store: SharedViewStore) -> Router {
    Router::new()
        .route("/", get(|| async { "vehicle auctions" }))
        .route("/vehicles", get(get_vehicles))
        .route("/vehicles/:id", get(get_vehicle))
        .route("/filters", post(post_filter))
        .route("/filters/reset", post(post_reset))
        .route("/favourites/:id/toggle", post(post_toggle_favourite))
        .with_state(AppState {
            event_writer,
            view_store,
        })
}

async fn run_http_server(
    addr: SocketAddr,
    app: Router,
    shutdown: oneshot::Receiver<()>,
) -> Result<()> {
    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown.map(|_| ()))
        .await?;

    Ok(())
}

pub struct Ui {
    // cancels all tasks on drop
    _runtime: Runtime,
    server_rx: oneshot::Receiver<Result<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl Ui {
    pub fn new(
        addr: SocketAddr,
        event_writer: event_log::SharedWriter,
        view_store: SharedViewStore,
    ) -> Result<Self> {
        let runtime = Runtime::new()?;

        let (tx, rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let app = router(event_writer, view_store);

        runtime.spawn(async move {
            let res = run_http_server(addr, app, shutdown_rx)
                .await
                .with_context(|| format!("failed to run http server on {addr}"));
            if tx.send(res).is_err() {
                error!("ui went away before the http server finished");
            }
        });
        info!(%addr, "serving listing");

        Ok(Self {
            _runtime: runtime,
            server_rx: rx,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl LoopService for Ui {
    fn run_iteration(&mut self) -> Result<()> {
        // don't hog the cpu
        thread::sleep(Duration::from_millis(100));

        match self.server_rx.try_recv() {
            Ok(Ok(())) => Err(format_err!("http server stopped")),
            Ok(Err(e)) => Err(e),
            Err(oneshot::error::TryRecvError::Empty) => Ok(()),
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(format_err!("ui server died without leaving a response?!"))
            }
        }
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            // the server may already be gone
            let _ = shutdown_tx.send(());
        }
    }
}
