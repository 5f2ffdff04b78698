//! Tests for Dispatcher
//!
//! These tests verify:
//! - Index redirect to the default page
//! - View / edit / save flows, including missing pages
//! - 404 for paths outside the route table
//! - Storage failures surfacing as 500
//! - Link rendering and escaping in the view output
//! - Concurrent saves to one title

use std::fs;
use std::io;
use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use pagewiki::config::Config;
use pagewiki::dispatcher::Dispatcher;
use pagewiki::protocol::{Method, Request, Response, Status, FORM_CONTENT_TYPE};
use pagewiki::storage::{FileStore, PageStore};
use pagewiki::templates::Templates;
use pagewiki::{Result, WikiError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dispatcher() -> (TempDir, Dispatcher) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().pages_dir(temp_dir.path()).build();
    let dispatcher = Dispatcher::open(config).unwrap();
    (temp_dir, dispatcher)
}

fn get(dispatcher: &Dispatcher, path: &str) -> Response {
    dispatcher.dispatch(&Request::get(path))
}

fn save(dispatcher: &Dispatcher, title: &str, body: &str) -> Response {
    dispatcher.dispatch(&Request::post_form(format!("/save/{}", title), &[("body", body)]))
}

/// Store whose writes always fail
struct ReadOnlyStore;

impl PageStore for ReadOnlyStore {
    fn load(&self, title: &str) -> Result<Bytes> {
        Err(WikiError::PageNotFound(title.to_string()))
    }

    fn save(&self, title: &str, _body: &[u8]) -> Result<()> {
        Err(WikiError::StorageWrite {
            title: title.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "disk is read-only"),
        })
    }
}

// =============================================================================
// Index Tests
// =============================================================================

#[test]
fn test_index_redirects_to_front_page() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    let response = get(&dispatcher, "/");

    assert_eq!(response.status, Status::Found);
    assert_eq!(response.location.as_deref(), Some("/view/FrontPage"));
}

#[test]
fn test_index_uses_configured_default_title() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .pages_dir(temp_dir.path())
        .default_title("Start_Here")
        .build();
    let dispatcher = Dispatcher::open(config).unwrap();

    let response = get(&dispatcher, "/");

    assert_eq!(response.location.as_deref(), Some("/view/Start_Here"));
}

#[test]
fn test_open_rejects_invalid_default_title() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .pages_dir(temp_dir.path())
        .default_title("../etc")
        .build();

    assert!(matches!(Dispatcher::open(config), Err(WikiError::Config(_))));
}

// =============================================================================
// View / Edit Tests
// =============================================================================

#[test]
fn test_view_missing_page_redirects_to_edit() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    let response = get(&dispatcher, "/view/Ghost");

    assert_eq!(response.status, Status::Found);
    assert_eq!(response.location.as_deref(), Some("/edit/Ghost"));
}

#[test]
fn test_view_unreadable_page_redirects_to_edit() {
    let (temp, dispatcher) = setup_temp_dispatcher();
    // A directory where the page file should be cannot be read as a page
    fs::create_dir(temp.path().join("Broken.txt")).unwrap();

    let response = get(&dispatcher, "/view/Broken");

    assert_eq!(response.status, Status::Found);
    assert_eq!(response.location.as_deref(), Some("/edit/Broken"));
}

#[test]
fn test_escaped_title_in_path_is_decoded() {
    let (_temp, dispatcher) = setup_temp_dispatcher();
    save(&dispatcher, "FrontPage", "front");

    let response = get(&dispatcher, "/view/Front%50age");

    assert_eq!(response.status, Status::Ok);
    assert!(response.body_text().contains("<h1>FrontPage</h1>"));
}

#[test]
fn test_edit_missing_page_shows_empty_form() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    let response = get(&dispatcher, "/edit/Ghost");
    let html = response.body_text();

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.content_type, Some(Response::HTML));
    assert!(html.contains("Editing Ghost"));
    assert!(html.contains("action=\"/save/Ghost\""));
    assert!(html.contains("cols=\"80\"></textarea>"));
}

#[test]
fn test_edit_existing_page_shows_raw_body() {
    let (_temp, dispatcher) = setup_temp_dispatcher();
    save(&dispatcher, "Home", "see [Other]");

    let html = get(&dispatcher, "/edit/Home").body_text();

    assert!(html.contains(">see [Other]</textarea>"));
    assert!(!html.contains("<a href=\"/view/Other\">"));
}

#[test]
fn test_view_renders_links() {
    let (_temp, dispatcher) = setup_temp_dispatcher();
    save(&dispatcher, "Home", "see [Home] and [Other_Page]");

    let response = get(&dispatcher, "/view/Home");
    let html = response.body_text();

    assert_eq!(response.status, Status::Ok);
    assert!(html.contains(
        "see <a href=\"/view/Home\">Home</a> and <a href=\"/view/Other_Page\">Other_Page</a>"
    ));
    assert!(html.contains("href=\"/edit/Home\""));
}

#[test]
fn test_view_renders_links_exactly_once() {
    let (_temp, dispatcher) = setup_temp_dispatcher();
    save(&dispatcher, "Home", "[Other]");

    let html = get(&dispatcher, "/view/Home").body_text();

    assert_eq!(html.matches("<a href=\"/view/Other\">Other</a>").count(), 1);
    assert!(!html.contains("&lt;a href"));
}

#[test]
fn test_view_escapes_page_markup() {
    let (_temp, dispatcher) = setup_temp_dispatcher();
    save(&dispatcher, "Home", "<script>alert(1)</script> [<img src=x>]");

    let html = get(&dispatcher, "/view/Home").body_text();

    assert!(!html.contains("<script>alert"));
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_redirects_to_view_and_persists() {
    let (temp, dispatcher) = setup_temp_dispatcher();

    let response = save(&dispatcher, "Home", "hello\nworld");

    assert_eq!(response.status, Status::Found);
    assert_eq!(response.location.as_deref(), Some("/view/Home"));
    assert_eq!(fs::read(temp.path().join("Home.txt")).unwrap(), b"hello\nworld");
}

#[test]
fn test_save_overwrites_previous_body() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    save(&dispatcher, "Home", "first");
    save(&dispatcher, "Home", "second");

    assert_eq!(dispatcher.store().load("Home").unwrap(), Bytes::from("second"));
}

#[test]
fn test_save_without_body_field_stores_empty_page() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    let response = dispatcher.dispatch(&Request::post_form("/save/Blank", &[("other", "x")]));

    assert_eq!(response.status, Status::Found);
    assert_eq!(dispatcher.store().load("Blank").unwrap(), Bytes::new());
}

#[test]
fn test_save_reads_query_when_no_form_body() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    let request = Request::get("/save/Home").with_query(Some("body=from+query".to_string()));
    let response = dispatcher.dispatch(&request);

    assert_eq!(response.status, Status::Found);
    assert_eq!(dispatcher.store().load("Home").unwrap(), Bytes::from("from query"));
}

#[test]
fn test_save_keeps_non_utf8_bytes() {
    let (temp, dispatcher) = setup_temp_dispatcher();

    let request = Request::new(Method::Post, "/save/Bin").with_body(
        Some(FORM_CONTENT_TYPE.to_string()),
        Bytes::from_static(b"body=a%FFb%00%C3"),
    );
    let response = dispatcher.dispatch(&request);

    assert_eq!(response.status, Status::Found);
    assert_eq!(
        fs::read(temp.path().join("Bin.txt")).unwrap(),
        vec![b'a', 0xff, b'b', 0x00, 0xc3]
    );
}

#[test]
fn test_save_storage_failure_is_server_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().pages_dir(temp_dir.path()).build();
    let dispatcher =
        Dispatcher::new(config, Arc::new(ReadOnlyStore), Templates::builtin().unwrap()).unwrap();

    let response = save(&dispatcher, "Home", "text");

    assert_eq!(response.status, Status::InternalServerError);
    assert!(response.location.is_none());
    assert_eq!(response.content_type, Some(Response::TEXT));
    assert!(response.body_text().contains("disk is read-only"));
}

#[test]
fn test_save_unwritable_file_is_server_error() {
    let (temp, dispatcher) = setup_temp_dispatcher();
    fs::create_dir(temp.path().join("Broken.txt")).unwrap();

    let response = save(&dispatcher, "Broken", "text");

    assert_eq!(response.status, Status::InternalServerError);
    assert!(response.location.is_none());
    assert!(response.body_text().contains("failed to save page Broken"));
    assert!(temp.path().join("Broken.txt").is_dir());
}

// =============================================================================
// Routing Tests
// =============================================================================

#[test]
fn test_invalid_titles_are_not_found_for_every_operation() {
    let (temp, dispatcher) = setup_temp_dispatcher();

    for op in ["view", "edit", "save"] {
        for title in ["a.b", "a b", "..", "a/b", "x\ty", "Home!"] {
            let path = format!("/{}/{}", op, title);
            let response = dispatcher.dispatch(&Request::post_form(path.clone(), &[("body", "x")]));

            assert_eq!(response.status, Status::NotFound, "{path:?}");
            assert_eq!(response.body_text(), "404 page not found\n");
        }
    }

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_paths_are_not_found() {
    let (_temp, dispatcher) = setup_temp_dispatcher();

    for path in ["/favicon.ico", "/view", "/view/", "/delete/Home", "/view/Home/extra"] {
        assert_eq!(get(&dispatcher, path).status, Status::NotFound, "{path:?}");
    }
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_saves_last_writer_wins() {
    let (_temp, dispatcher) = setup_temp_dispatcher();
    let dispatcher = Arc::new(dispatcher);
    let body_a = "A".repeat(64 * 1024);
    let body_b = "B".repeat(64 * 1024);

    let handles: Vec<_> = [body_a.clone(), body_b.clone()]
        .into_iter()
        .map(|body| {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || {
                for _ in 0..20 {
                    let response = save(&dispatcher, "Shared", &body);
                    assert_eq!(response.status, Status::Found);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = dispatcher.store().load("Shared").unwrap();
    assert!(stored == body_a.as_bytes() || stored == body_b.as_bytes());
}

#[test]
fn test_dispatcher_over_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
    let config = Config::builder().pages_dir(temp_dir.path()).build();
    let dispatcher = Dispatcher::new(config, store.clone(), Templates::builtin().unwrap()).unwrap();

    save(&dispatcher, "Home", "x");

    assert_eq!(store.load("Home").unwrap(), Bytes::from("x"));
}
