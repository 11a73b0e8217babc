#![allow(clippy::expect_used)]

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use hostcheck::application::config::{DependencyConfig, EndpointConfig, PostgresConfig};
use hostcheck::domain::entities::DependencyStatus;
use hostcheck::infrastructure::probes::{build_probes, run_probes, ProbeCapabilities};

/// Minimal RESP server: `+PONG` for `PING`, `+OK` for anything else.
async fn fake_redis() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept");
        let mut stream = BufReader::new(socket);
        let mut line = String::new();
        loop {
            line.clear();
            if stream.read_line(&mut line).await.unwrap_or(0) == 0 {
                break;
            }
            let Some(count) = line.trim_end().strip_prefix('*') else {
                break;
            };
            let count: usize = count.parse().expect("array length");
            let mut command = String::new();
            for i in 0..count {
                line.clear();
                stream.read_line(&mut line).await.expect("bulk header");
                let len: usize = line.trim_end()[1..].parse().expect("bulk length");
                let mut arg = vec![0u8; len + 2];
                stream.read_exact(&mut arg).await.expect("bulk body");
                if i == 0 {
                    command = String::from_utf8_lossy(&arg[..len]).to_uppercase();
                }
            }
            let reply: &[u8] = if command == "PING" { b"+PONG\r\n" } else { b"+OK\r\n" };
            stream.get_mut().write_all(reply).await.expect("write reply");
        }
    });
    port
}

/// Accepts one PostgreSQL startup and lets the login through.
async fn fake_postgres() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let len = socket.read_u32().await.expect("startup length");
        let mut startup = vec![0u8; len as usize - 4];
        socket.read_exact(&mut startup).await.expect("startup body");
        // AuthenticationOk, then ReadyForQuery (idle).
        socket
            .write_all(&[b'R', 0, 0, 0, 8, 0, 0, 0, 0, b'Z', 0, 0, 0, 5, b'I'])
            .await
            .expect("write reply");
        let mut rest = Vec::new();
        let _ = socket.read_to_end(&mut rest).await;
    });
    port
}

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

fn endpoint(port: u16) -> EndpointConfig {
    EndpointConfig {
        host: "127.0.0.1".into(),
        port,
        timeout_secs: 2,
    }
}

fn postgres(port: u16) -> PostgresConfig {
    PostgresConfig {
        endpoint: endpoint(port),
        user: "monitor".into(),
        database: Some("app".into()),
        password: Some("s3cret".into()),
    }
}

#[cfg(all(feature = "redis", feature = "postgres"))]
#[tokio::test]
async fn reachable_dependencies_are_connected() {
    let config = DependencyConfig {
        redis: Some(endpoint(fake_redis().await)),
        postgres: Some(postgres(fake_postgres().await)),
    };

    let checks = run_probes(&build_probes(&config, ProbeCapabilities::detect())).await;

    let summary: Vec<(&str, &DependencyStatus)> =
        checks.iter().map(|c| (c.name.as_str(), &c.status)).collect();
    assert_eq!(
        summary,
        vec![
            ("redis", &DependencyStatus::Connected),
            ("postgres", &DependencyStatus::Connected),
        ]
    );
}

#[cfg(feature = "redis")]
#[tokio::test]
async fn unreachable_redis_fails_without_error() {
    let config = DependencyConfig {
        redis: Some(endpoint(closed_port().await)),
        postgres: None,
    };

    let checks = run_probes(&build_probes(&config, ProbeCapabilities::detect())).await;

    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].status.as_str(), "FAILED");
    assert!(checks[0]
        .status
        .message()
        .is_some_and(|m| m.starts_with("redis: ")));
}

#[tokio::test]
async fn missing_support_is_skipped_without_io() {
    // Nothing listens on this port; a skipped probe must not try to connect.
    let port = closed_port().await;
    let config = DependencyConfig {
        redis: Some(endpoint(port)),
        postgres: Some(postgres(port)),
    };
    let caps = ProbeCapabilities {
        redis: false,
        postgres: true,
    };

    let checks = run_probes(&build_probes(&config, caps)).await;

    assert_eq!(
        checks[0].status,
        DependencyStatus::Skipped("redis support not compiled in".into())
    );
    assert_eq!(checks[1].name, "postgres");
}

#[tokio::test]
async fn no_configured_dependencies_means_no_checks() {
    let checks = run_probes(&build_probes(
        &DependencyConfig::default(),
        ProbeCapabilities::detect(),
    ))
    .await;
    assert!(checks.is_empty());
}
