//! Request/response client for the browser's debug WebSocket.
//!
//! This is deliberately not a protocol binding. Commands go out with an
//! auto-incremented id, responses are correlated back to the caller
//! through a pending-call registry, and event notifications are dropped
//! on the floor. One method, `Runtime.evaluate`, carries everything the
//! pipeline needs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::error::{Error, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<RpcResponse>>>>;

#[derive(Debug, Serialize)]
struct RpcCommand {
	id: u64,
	method: String,
	params: Value,
}

#[derive(Debug)]
struct RpcResponse {
	result: Option<Value>,
	error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
	code: i64,
	message: String,
}

/// A live debug session against one browser tab.
///
/// A background task owns the read half of the socket and routes each
/// response to whichever call registered its id, so calls may overlap
/// freely. Dropping the client stops the task; pending calls then fail
/// instead of hanging.
pub struct CdpClient {
	next_id: AtomicU64,
	pending: Pending,
	writer: Mutex<WsSink>,
	reader_handle: JoinHandle<()>,
	rpc_timeout: Duration,
}

impl CdpClient {
	/// Connects to a `webSocketDebuggerUrl`. `rpc_timeout` bounds every
	/// round trip made through this client.
	pub async fn connect(ws_url: &str, rpc_timeout: Duration) -> Result<Self> {
		debug!(target = "landfall.cdp", url = ws_url, "connecting to debug endpoint");

		let (stream, _) = tokio_tungstenite::connect_async(ws_url)
			.await
			.map_err(|e| Error::Network(format!("failed to connect to {ws_url}: {e}")))?;
		let (writer, reader) = stream.split();

		let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
		let reader_handle = tokio::spawn(read_loop(reader, Arc::clone(&pending)));

		Ok(Self {
			next_id: AtomicU64::new(1),
			pending,
			writer: Mutex::new(writer),
			reader_handle,
			rpc_timeout,
		})
	}

	/// Sends one command and waits for its correlated response. Protocol
	/// errors reported by the browser and timeouts both surface as remote
	/// call failures.
	pub async fn send_command(&self, method: &str, params: Value) -> Result<Value> {
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		let command = RpcCommand { id, method: method.to_string(), params };
		let json = serde_json::to_string(&command).map_err(|e| Error::Protocol(format!("failed to serialize {method}: {e}")))?;

		debug!(target = "landfall.cdp", id, method, "sending command");

		// Register before sending so a fast response cannot race the registry.
		let (tx, rx) = oneshot::channel();
		self.pending.lock().await.insert(id, tx);

		{
			let mut writer = self.writer.lock().await;
			if let Err(e) = writer.send(Message::Text(json.into())).await {
				self.pending.lock().await.remove(&id);
				return Err(Error::Network(format!("failed to send {method}: {e}")));
			}
		}

		let response = match tokio::time::timeout(self.rpc_timeout, rx).await {
			Ok(Ok(response)) => response,
			Ok(Err(_)) => return Err(Error::Remote("debug connection closed before the response arrived".to_string())),
			Err(_) => {
				self.pending.lock().await.remove(&id);
				return Err(Error::Remote(format!("{method} timed out after {}ms", self.rpc_timeout.as_millis())));
			}
		};

		if let Some(err) = response.error {
			return Err(Error::Remote(format!("{} (code {})", err.message, err.code)));
		}
		Ok(response.result.unwrap_or(Value::Null))
	}

	/// Evaluates a JS expression in the page, awaiting promise resolution
	/// and returning the value by JSON. A throw inside the page comes back
	/// as a remote failure carrying the page's own exception description.
	pub async fn evaluate(&self, expression: &str) -> Result<Value> {
		let result = self
			.send_command(
				"Runtime.evaluate",
				json!({
					"expression": expression,
					"returnByValue": true,
					"awaitPromise": true,
				}),
			)
			.await?;

		if let Some(details) = result.get("exceptionDetails") {
			return Err(Error::Remote(exception_description(details)));
		}

		Ok(result.get("result").and_then(|r| r.get("value")).cloned().unwrap_or(Value::Null))
	}

	/// Closes the socket and stops the reader. Calls still in flight fail
	/// with a remote error rather than hanging.
	pub async fn close(&self) {
		let mut writer = self.writer.lock().await;
		let _ = writer.send(Message::Close(None)).await;
		let _ = writer.flush().await;
		self.reader_handle.abort();
		self.pending.lock().await.clear();
	}
}

impl Drop for CdpClient {
	fn drop(&mut self) {
		self.reader_handle.abort();
	}
}

fn exception_description(details: &Value) -> String {
	details
		.get("exception")
		.and_then(|e| e.get("description"))
		.and_then(Value::as_str)
		.or_else(|| details.get("text").and_then(Value::as_str))
		.unwrap_or("evaluation threw without a description")
		.to_string()
}

fn parse_response(value: &Value) -> Option<(u64, RpcResponse)> {
	let id = value.get("id")?.as_u64()?;
	let response = RpcResponse {
		result: value.get("result").cloned(),
		error: value.get("error").and_then(|e| serde_json::from_value(e.clone()).ok()),
	};
	Some((id, response))
}

async fn read_loop(mut reader: WsSource, pending: Pending) {
	while let Some(next) = reader.next().await {
		let message = match next {
			Ok(message) => message,
			Err(e) => {
				warn!(target = "landfall.cdp", error = %e, "read failed, stopping");
				break;
			}
		};

		let text = match message {
			Message::Text(text) => text.to_string(),
			Message::Close(_) => {
				debug!(target = "landfall.cdp", "remote closed the connection");
				break;
			}
			_ => continue,
		};

		let value: Value = match serde_json::from_str(&text) {
			Ok(value) => value,
			Err(e) => {
				warn!(target = "landfall.cdp", error = %e, "discarding unparseable frame");
				continue;
			}
		};

		if let Some((id, response)) = parse_response(&value) {
			if let Some(tx) = pending.lock().await.remove(&id) {
				let _ = tx.send(response);
			} else {
				debug!(target = "landfall.cdp", id, "response for unknown call id");
			}
		} else if let Some(method) = value.get("method").and_then(Value::as_str) {
			// Event notifications are outside this client's contract.
			debug!(target = "landfall.cdp", method, "ignoring event notification");
		}
	}

	// Dropping the senders fails any call still waiting.
	pending.lock().await.clear();
}
