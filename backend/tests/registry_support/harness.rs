//! Server harness and shared world for registry behaviour tests.
//!
//! Owns a single-threaded Tokio runtime plus a `LocalSet` because Actix uses
//! `spawn_local` internally. Dropping the [`WorldFixture`] stops the server,
//! even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use user_registry::Trace;
use user_registry::domain::{DeletionPolicy, UserRegistryService};
use user_registry::inbound::http::api_scope;
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::memory::InMemoryUserStore;
use user_registry::test_support::MutableClock;

pub(crate) struct RegistryWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) clock: Arc<MutableClock>,
    pub(crate) store: Arc<InMemoryUserStore>,
    pub(crate) registered_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<RegistryWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // `LocalSet` must be driven on the thread that owns it.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Run `operation` against the server. The future must not touch the world.
pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_registry_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api_scope())
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let store = Arc::new(InMemoryUserStore::new());
    let clock = Arc::new(MutableClock::at_fixture_instant());
    let service = UserRegistryService::new(store.clone(), clock.clone(), DeletionPolicy::default());
    let http_state = HttpState::from_service(Arc::new(service));

    let (base_url, server) = local
        .block_on(&runtime, spawn_registry_server(http_state))
        .expect("registry server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(RegistryWorld {
            runtime,
            local,
            base_url,
            server,
            clock,
            store,
            registered_id: None,
            last_status: None,
            last_body: None,
            last_trace_id: None,
        })),
    }
}
