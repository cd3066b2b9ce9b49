use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::future::Future;
use std::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::grpc::{MailServer, MailingListServiceServer};
use crate::routes::{
    create_email, delete_email, get_email, get_email_batch, health_check, ignore_request,
    update_email,
};
use crate::storage::MailingListStore;

type GrpcServer = std::pin::Pin<Box<dyn Future<Output = Result<(), tonic::transport::Error>> + Send>>;

/// Both front ends, bound and ready to serve over one shared store.
pub struct Application {
    json_port: u16,
    grpc_port: u16,
    store: MailingListStore,
    json_server: Server,
    grpc_server: GrpcServer,
}

impl Application {
    /// Opens the database, makes sure the schema exists and binds both
    /// listeners. Any failure here is fatal for the process.
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        if let Some(parent) = config.database.get_parent_dir() {
            std::fs::create_dir_all(&parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tracing::info!("Using the database: '{}'", config.database.path);

        let store = MailingListStore::new(get_connection_db_pool(&config.database));
        store
            .ensure_schema()
            .await
            .context("Failed to create the database schema.")?;

        let json_address = config.get_json_address();
        let listener = TcpListener::bind(&json_address)
            .with_context(|| format!("JSON server failed to bind {}", json_address))?;
        let json_port = listener.local_addr()?.port();
        let json_server = run_json_api(listener, store.clone())?;
        tracing::info!("JSON API server is listening on {}", json_address);

        let grpc_address = config.get_grpc_address();
        let listener = tokio::net::TcpListener::bind(&grpc_address)
            .await
            .with_context(|| format!("gRPC server failed to bind {}", grpc_address))?;
        let grpc_port = listener.local_addr()?.port();
        let grpc_server = run_grpc_api(listener, store.clone());
        tracing::info!("gRPC server is listening on {}", grpc_address);

        Ok(Self {
            json_port,
            grpc_port,
            store,
            json_server,
            grpc_server,
        })
    }

    pub fn get_json_port(&self) -> u16 {
        self.json_port
    }

    pub fn get_grpc_port(&self) -> u16 {
        self.grpc_port
    }

    pub fn get_store(&self) -> MailingListStore {
        self.store.clone()
    }

    /// Serves both APIs until one of them fails.
    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        let Application {
            json_server,
            grpc_server,
            ..
        } = self;
        let json_server = async move {
            json_server
                .await
                .context("JSON API server stopped with an error.")
        };
        let grpc_server = async move {
            grpc_server
                .await
                .context("gRPC server stopped with an error.")
        };

        tokio::try_join!(json_server, grpc_server)?;

        Ok(())
    }
}

pub fn run_json_api(listener: TcpListener, store: MailingListStore) -> Result<Server, std::io::Error> {
    let store = web::Data::new(store);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/email/create")
                    .route(web::post().to(create_email))
                    .default_service(web::to(ignore_request)),
            )
            .service(
                web::resource("/email/get")
                    .route(web::post().to(get_email))
                    .default_service(web::to(ignore_request)),
            )
            .service(
                web::resource("/email/get_batch")
                    .route(web::post().to(get_email_batch))
                    .default_service(web::to(ignore_request)),
            )
            .service(
                web::resource("/email/update")
                    .route(web::put().to(update_email))
                    .default_service(web::to(ignore_request)),
            )
            .service(
                web::resource("/email/delete")
                    .route(web::post().to(delete_email))
                    .default_service(web::to(ignore_request)),
            )
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn run_grpc_api(listener: tokio::net::TcpListener, store: MailingListStore) -> GrpcServer {
    let service = MailingListServiceServer::new(MailServer::new(store));

    Box::pin(
        tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_incoming(TcpListenerStream::new(listener)),
    )
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
