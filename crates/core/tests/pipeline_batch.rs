//! Batch pipeline tests against a loopback content host.

use std::time::Duration;

use landfall::{
	DeployConfig, Deployer, FailureKind, FakeSurface, Outcome, PageFetcher, PageSlug, SiteConfig,
	extract::{self, HeadMarker},
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

fn sample_document(slug: &str) -> String {
	format!(
		concat!(
			"<!DOCTYPE html>\n<html>\n<head>\n<title>{slug}</title>\n",
			"<meta name=\"robots\" content=\"index,follow\">\n",
			"<link rel=\"preload\" href=\"/fonts/satoshi.woff2\" as=\"font\">\n",
			"<style>.hero-{slug}{{color:#123}}</style>\n",
			"</head>\n<body class=\"landing\">\n  <main>{slug} hero copy</main>\n</body>\n</html>\n"
		),
		slug = slug
	)
}

fn http_response(path: &str) -> String {
	let slug = path.split('/').nth(5).unwrap_or("").to_string();
	let body = match slug.as_str() {
		"missing" => None,
		"bare" => Some("<html><body>no head markers here</body></html>".to_string()),
		_ => Some(sample_document(&slug)),
	};
	match body {
		Some(html) => format!(
			"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			html.len(),
			html
		),
		None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
	}
}

/// Serves sample page documents the way the raw content host would.
async fn spawn_site() -> (tokio::task::JoinHandle<()>, SiteConfig) {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();

	let handle = tokio::spawn(async move {
		loop {
			let Ok((mut stream, _)) = listener.accept().await else { break };
			tokio::spawn(async move {
				let mut buf = vec![0u8; 8192];
				let n = stream.read(&mut buf).await.unwrap_or(0);
				let request = String::from_utf8_lossy(&buf[..n]).to_string();
				let path = request.lines().next().and_then(|line| line.split_whitespace().nth(1)).unwrap_or("/").to_string();
				let _ = stream.write_all(http_response(&path).as_bytes()).await;
				let _ = stream.shutdown().await;
			});
		}
	});

	let site = SiteConfig {
		host: Url::parse(&format!("http://{addr}")).unwrap(),
		owner: "acme".to_string(),
		repo: "site".to_string(),
		branch: "main".to_string(),
	};
	(handle, site)
}

fn slugs(names: &[&str]) -> Vec<PageSlug> {
	names.iter().map(|n| PageSlug::new(*n).unwrap()).collect()
}

#[tokio::test]
async fn batch_keeps_order_and_continues_past_failures() {
	let (server, site) = spawn_site().await;
	let config = DeployConfig::default();
	let fetcher = PageFetcher::new(site, Duration::from_secs(5)).unwrap();
	let surface = FakeSurface::with_slots(3);
	let deployer = Deployer::new(&config, &fetcher, &surface);

	let report = deployer.deploy_batch(&slugs(&["alpha", "missing", "gamma"])).await;

	assert_eq!(report.total(), 3);
	assert_eq!(report.staged_count(), 2);
	let order: Vec<&str> = report.results.iter().map(|r| r.slug.as_str()).collect();
	assert_eq!(order, vec!["alpha", "missing", "gamma"]);

	assert!(report.results[0].outcome.is_staged());
	match &report.results[1].outcome {
		Outcome::Failed { kind, detail } => {
			assert_eq!(*kind, FailureKind::Fetch);
			assert!(detail.contains("404"), "got {detail}");
		}
		other => panic!("expected a fetch failure, got {other:?}"),
	}
	assert!(report.results[2].outcome.is_staged());

	// The surface holds whatever was staged last.
	let document = sample_document("gamma");
	let expected_head = extract::extract_head(&document, HeadMarker::RobotsMeta).unwrap();
	let expected_body = extract::extract_body(&document).unwrap();
	let values = surface.values().await;
	assert_eq!(values[0], "");
	assert_eq!(values[1], expected_head);
	assert_eq!(values[2], expected_body);

	server.abort();
}

#[tokio::test]
async fn staging_a_page_twice_is_idempotent() {
	let (server, site) = spawn_site().await;
	let config = DeployConfig::default();
	let fetcher = PageFetcher::new(site, Duration::from_secs(5)).unwrap();
	let surface = FakeSurface::with_slots(3);
	let deployer = Deployer::new(&config, &fetcher, &surface);
	let page = slugs(&["alpha"]);

	let first = deployer.deploy_batch(&page).await;
	assert_eq!(first.staged_count(), 1);
	let after_first = surface.values().await;

	let second = deployer.deploy_batch(&page).await;
	assert_eq!(second.staged_count(), 1);
	assert_eq!(surface.values().await, after_first);
	assert_eq!(surface.write_log().await.len(), 6);

	server.abort();
}

#[tokio::test]
async fn unextractable_document_fails_without_touching_editors() {
	let (server, site) = spawn_site().await;
	let config = DeployConfig::default();
	let fetcher = PageFetcher::new(site, Duration::from_secs(5)).unwrap();
	let surface = FakeSurface::with_slots(3);
	let deployer = Deployer::new(&config, &fetcher, &surface);

	let report = deployer.deploy_batch(&slugs(&["bare"])).await;

	match &report.results[0].outcome {
		Outcome::Failed { kind, detail } => {
			assert_eq!(*kind, FailureKind::Extraction);
			assert!(detail.contains("head=false body=true"), "got {detail}");
		}
		other => panic!("expected an extraction failure, got {other:?}"),
	}
	assert!(surface.write_log().await.is_empty());

	server.abort();
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
	// Bind then drop to get a loopback port with no listener behind it.
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let site = SiteConfig {
		host: Url::parse(&format!("http://{addr}")).unwrap(),
		owner: "acme".to_string(),
		repo: "site".to_string(),
		branch: "main".to_string(),
	};
	let config = DeployConfig::default();
	let fetcher = PageFetcher::new(site, Duration::from_millis(500)).unwrap();
	let surface = FakeSurface::with_slots(3);
	let deployer = Deployer::new(&config, &fetcher, &surface);

	let report = deployer.deploy_batch(&slugs(&["alpha"])).await;
	match &report.results[0].outcome {
		Outcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::Network),
		other => panic!("expected a network failure, got {other:?}"),
	}
}

#[tokio::test]
async fn slow_host_times_out_as_a_network_failure() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();

	let server = tokio::spawn(async move {
		// Accept and then sit on the connection without answering.
		while let Ok((stream, _)) = listener.accept().await {
			tokio::spawn(async move {
				let _held = stream;
				tokio::time::sleep(Duration::from_secs(5)).await;
			});
		}
	});

	let site = SiteConfig {
		host: Url::parse(&format!("http://{addr}")).unwrap(),
		owner: "acme".to_string(),
		repo: "site".to_string(),
		branch: "main".to_string(),
	};
	let config = DeployConfig::default();
	let fetcher = PageFetcher::new(site, Duration::from_millis(200)).unwrap();
	let surface = FakeSurface::with_slots(3);
	let deployer = Deployer::new(&config, &fetcher, &surface);

	let report = deployer.deploy_batch(&slugs(&["alpha"])).await;
	match &report.results[0].outcome {
		Outcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::Network),
		other => panic!("expected a network failure, got {other:?}"),
	}

	server.abort();
}
