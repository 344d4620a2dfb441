//! `vision::Client` against a local server that speaks the Read API.

use std::{
	io::Read,
	sync::mpsc::{self, Receiver},
	time::Duration,
};

use vision::{CancelToken, Client, Error, ImageSource, Outcome, PollPolicy, ReadApi, ReadOptions, Session};

const KEY: &str = "test-subscription-key";

struct Reply {
	status: u16,
	body: Vec<u8>,
	operation_location: bool,
}

impl Reply {
	fn accepted() -> Self {
		Self {
			status: 202,
			body: Vec::new(),
			operation_location: true,
		}
	}

	fn json(status: u16, body: &str) -> Self {
		Self::raw(status, body.as_bytes())
	}

	fn raw(status: u16, body: &[u8]) -> Self {
		Self {
			status,
			body: body.to_vec(),
			operation_location: false,
		}
	}
}

#[derive(Debug)]
struct Recorded {
	method: String,
	url: String,
	key: Option<String>,
	content_type: Option<String>,
	body: Vec<u8>,
}

/// Serve `replies` in order, one per request, recording what the client sent.
fn serve(replies: Vec<Reply>) -> (String, Receiver<Recorded>) {
	let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
	let base = format!("http://{}", server.server_addr().to_ip().unwrap());
	let location = format!("{base}/vision/v3.2/read/analyzeResults/op-1");
	let (tx, rx) = mpsc::channel();

	std::thread::spawn(move || {
		for reply in replies {
			let Ok(mut request) = server.recv() else { return };

			let header = |name: &'static str| {
				request
					.headers()
					.iter()
					.find(|h| h.field.equiv(name))
					.map(|h| h.value.as_str().to_owned())
			};
			let mut recorded = Recorded {
				method: request.method().as_str().to_owned(),
				url: request.url().to_owned(),
				key: header("Ocp-Apim-Subscription-Key"),
				content_type: header("Content-Type"),
				body: Vec::new(),
			};
			request.as_reader().read_to_end(&mut recorded.body).unwrap();
			let _ = tx.send(recorded);

			let mut response = tiny_http::Response::from_data(reply.body)
				.with_status_code(tiny_http::StatusCode(reply.status));
			if reply.operation_location {
				response.add_header(tiny_http::Header::from_bytes(&b"Operation-Location"[..], location.as_bytes()).unwrap());
			}
			let _ = request.respond(response);
		}
	});

	(base, rx)
}

fn client(base: &str, options: ReadOptions) -> Client {
	Client::new(Session::new(base, KEY).unwrap(), options, Duration::from_secs(5))
}

fn fast_policy() -> PollPolicy {
	PollPolicy {
		initial_interval: Duration::from_millis(1),
		multiplier: 1.0,
		max_interval: Duration::from_millis(1),
		max_attempts: 10,
	}
}

fn temp_image(name: &str, bytes: &[u8]) -> std::path::PathBuf {
	let path = std::env::temp_dir().join(format!("vision-test-{}-{name}", std::process::id()));
	std::fs::write(&path, bytes).unwrap();
	path
}

#[test]
fn url_submit_posts_json_and_returns_operation_id() {
	let (base, requests) = serve(vec![Reply::accepted()]);
	let job = client(&base, ReadOptions::default())
		.submit(&ImageSource::RemoteUrl("https://images.example/cat.jpg".into()))
		.unwrap();
	assert_eq!(job.as_str(), "op-1");

	let sent = requests.recv().unwrap();
	assert_eq!(sent.method, "POST");
	assert_eq!(sent.url, "/vision/v3.2/read/analyze");
	assert_eq!(sent.key.as_deref(), Some(KEY));
	assert!(sent.content_type.unwrap().starts_with("application/json"));
	let body: serde_json::Value = serde_json::from_slice(&sent.body).unwrap();
	assert_eq!(body, serde_json::json!({"url": "https://images.example/cat.jpg"}));
}

#[test]
fn local_submit_streams_file_bytes() {
	let bytes = b"\x89PNG\r\n\x1a\nnot-really-a-png";
	let path = temp_image("cat.png", bytes);
	let (base, requests) = serve(vec![Reply::accepted()]);

	client(&base, ReadOptions::default())
		.submit(&ImageSource::LocalPath(path.clone()))
		.unwrap();

	let sent = requests.recv().unwrap();
	assert_eq!(sent.content_type.as_deref(), Some("application/octet-stream"));
	assert_eq!(sent.body, bytes);
	let _ = std::fs::remove_file(path);
}

#[test]
fn read_options_become_query_parameters() {
	let (base, requests) = serve(vec![Reply::accepted()]);
	let options = ReadOptions {
		language: Some("pt".into()),
		reading_order: Some("natural".into()),
		model_version: None,
	};
	client(&base, options)
		.submit(&ImageSource::RemoteUrl("https://images.example/a.png".into()))
		.unwrap();

	let url = requests.recv().unwrap().url;
	assert!(url.starts_with("/vision/v3.2/read/analyze?"), "{url}");
	assert!(url.contains("language=pt"), "{url}");
	assert!(url.contains("readingOrder=natural"), "{url}");
	assert!(!url.contains("model-version"), "{url}");
}

#[test]
fn unauthorized_is_an_auth_error_with_service_message() {
	let (base, _requests) = serve(vec![Reply::json(
		401,
		r#"{"error": {"code": "401", "message": "Access denied due to invalid subscription key or wrong API endpoint."}}"#,
	)]);
	let err = client(&base, ReadOptions::default())
		.submit(&ImageSource::RemoteUrl("https://images.example/a.png".into()))
		.unwrap_err();

	assert!(err.is_auth());
	assert!(err.to_string().contains("invalid subscription key"), "{err}");
}

#[test]
fn bad_request_keeps_error_code() {
	let (base, _requests) = serve(vec![Reply::json(
		400,
		r#"{"error": {"code": "InvalidImageUrl", "message": "Image URL is badly formatted."}}"#,
	)]);
	let err = client(&base, ReadOptions::default())
		.submit(&ImageSource::RemoteUrl("nonsense".into()))
		.unwrap_err();

	match err {
		Error::Service { status, code, message } => {
			assert_eq!(status, 400);
			assert_eq!(code, "InvalidImageUrl");
			assert_eq!(message, "Image URL is badly formatted.");
		}
		other => panic!("expected service error, got {other:?}"),
	}
}

#[test]
fn unreadable_error_body_falls_back_to_status_reason() {
	let (base, _requests) = serve(vec![Reply::raw(500, &[0xff, 0xfe, 0xfd])]);
	let err = client(&base, ReadOptions::default())
		.submit(&ImageSource::RemoteUrl("https://images.example/a.png".into()))
		.unwrap_err();

	match err {
		Error::Service { status, code, message } => {
			assert_eq!(status, 500);
			assert_eq!(code, "");
			assert_eq!(message, "Internal Server Error");
		}
		other => panic!("expected service error, got {other:?}"),
	}
}

#[test]
fn missing_operation_location_is_malformed() {
	let (base, _requests) = serve(vec![Reply::json(202, "")]);
	let err = client(&base, ReadOptions::default())
		.submit(&ImageSource::RemoteUrl("https://images.example/a.png".into()))
		.unwrap_err();
	assert!(matches!(err, Error::MalformedResponse(_)), "{err:?}");
}

#[test]
fn extract_polls_until_text_is_ready() {
	let path = temp_image("cat.jpg", b"jpeg bytes");
	let (base, requests) = serve(vec![
		Reply::accepted(),
		Reply::json(200, r#"{"status": "notStarted"}"#),
		Reply::json(200, r#"{"status": "running"}"#),
		Reply::json(
			200,
			r#"{"status": "succeeded", "analyzeResult": {"version": "3.2.0", "readResults": [
				{"page": 1, "angle": 0, "width": 400, "height": 300, "unit": "pixel", "lines": [
					{"boundingBox": [0,0,1,0,1,1,0,1], "text": "Gato", "words": [{"text": "Gato", "confidence": 0.99}]},
					{"boundingBox": [0,2,1,2,1,3,0,3], "text": "preto", "words": [{"text": "preto", "confidence": 0.98}]}
				]}
			]}}"#,
		),
	]);

	let outcome = vision::extract(
		&client(&base, ReadOptions::default()),
		&ImageSource::LocalPath(path.clone()),
		&fast_policy(),
		&CancelToken::new(),
	)
	.unwrap();

	let Outcome::Text(result) = outcome else { panic!("expected recognized text") };
	assert_eq!(result.text(), "Gato\npreto\n");

	let sent = requests.try_iter().collect::<Vec<_>>();
	assert_eq!(sent.len(), 4);
	assert!(sent[1..].iter().all(|r| r.method == "GET" && r.url == "/vision/v3.2/read/analyzeResults/op-1"));
	assert!(sent.iter().all(|r| r.key.as_deref() == Some(KEY)));
	let _ = std::fs::remove_file(path);
}

#[test]
fn failed_operation_is_an_outcome_not_an_error() {
	let (base, _requests) = serve(vec![Reply::accepted(), Reply::json(200, r#"{"status": "failed"}"#)]);
	let outcome = vision::extract(
		&client(&base, ReadOptions::default()),
		&ImageSource::RemoteUrl("https://images.example/a.png".into()),
		&fast_policy(),
		&CancelToken::new(),
	)
	.unwrap();
	assert_eq!(outcome, Outcome::Failed(vision::OperationStatus::Failed));
}

#[test]
fn unreachable_host_is_a_transport_error() {
	// Bind and release a port so nothing is listening on it.
	let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
	let err = client(&format!("http://127.0.0.1:{port}"), ReadOptions::default())
		.submit(&ImageSource::RemoteUrl("https://images.example/a.png".into()))
		.unwrap_err();

	assert!(matches!(err, Error::Transport(_)), "{err:?}");
	assert!(!err.is_auth());
}

#[test]
fn unreadable_file_is_an_io_error() {
	let (base, _requests) = serve(vec![]);
	let err = client(&base, ReadOptions::default())
		.submit(&ImageSource::LocalPath("/definitely/not/here.png".into()))
		.unwrap_err();
	assert!(matches!(err, Error::Io { .. }), "{err:?}");
}
