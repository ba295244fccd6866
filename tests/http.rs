use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq)]
struct Entry {
    id: String,
    portion: String,
}

#[derive(Debug, Deserialize)]
struct DayLogResponse {
    date: String,
    meals: BTreeMap<String, Vec<Entry>>,
}

#[derive(Debug, Deserialize)]
struct RankedEntry {
    category_id: String,
    label: String,
    times_eaten: u32,
    weighted_score: u32,
}

#[derive(Debug, Deserialize)]
struct WeeklyStatsResponse {
    week: String,
    start_date: String,
    end_date: String,
    total_items: u32,
    max_score: u32,
    ranking: Vec<RankedEntry>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("food_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/portions")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: String) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_food_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(unique_data_path()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn add_entry(
    client: &Client,
    base_url: &str,
    date: &str,
    meal: &str,
    category_id: &str,
    portion: &str,
) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/days/{date}/entries"))
        .json(&serde_json::json!({
            "meal": meal,
            "category_id": category_id,
            "portion": portion,
        }))
        .send()
        .await
        .unwrap()
}

async fn weekly_stats(client: &Client, base_url: &str, week: &str) -> WeeklyStatsResponse {
    client
        .get(format!("{base_url}/api/stats?week={week}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_logged_food_shows_up_in_weekly_ranking() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = add_entry(&client, &server.base_url, "2024-03-04", "Lunch", "Verdure", "plate").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = add_entry(&client, &server.base_url, "2024-03-06", "Snack 1", "Frutta", "spoon").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let day: DayLogResponse = client
        .get(format!("{}/api/days/2024-03-04", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(day.date, "2024-03-04");
    assert_eq!(
        day.meals["Lunch"],
        vec![Entry {
            id: "Verdure".to_string(),
            portion: "plate".to_string()
        }]
    );

    let stats = weekly_stats(&client, &server.base_url, "2024-W10").await;
    assert_eq!(stats.week, "2024-W10");
    assert_eq!(stats.start_date, "2024-03-04");
    assert_eq!(stats.end_date, "2024-03-10");
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.max_score, 5);
    let ranked: Vec<(&str, u32, u32)> = stats
        .ranking
        .iter()
        .map(|entry| (entry.category_id.as_str(), entry.weighted_score, entry.times_eaten))
        .collect();
    assert_eq!(ranked, vec![("Verdure", 5, 1), ("Frutta", 2, 1)]);
    assert_eq!(stats.ranking[1].label, "Frutta Fresca");
}

#[tokio::test]
async fn http_remove_entry_updates_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    add_entry(&client, &server.base_url, "2024-05-13", "Dinner", "Pesce", "bowl").await;
    add_entry(&client, &server.base_url, "2024-05-13", "Dinner", "Dolci", "cup").await;

    let response = client
        .delete(format!("{}/api/days/2024-05-13/entries/Dinner/0", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let day: DayLogResponse = response.json().await.unwrap();
    let dinner: Vec<&str> = day.meals["Dinner"].iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(dinner, vec!["Dolci"]);

    let response = client
        .delete(format!("{}/api/days/2024-05-13/entries/Dinner/5", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_rejects_invalid_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = add_entry(&client, &server.base_url, "2024-13-01", "Lunch", "Verdure", "plate").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = add_entry(&client, &server.base_url, "2024-03-04", "Brunch", "Verdure", "plate").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = add_entry(&client, &server.base_url, "2024-03-04", "Lunch", "Pizza", "plate").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = add_entry(&client, &server.base_url, "2024-03-04", "Lunch", "Verdure", "bucket").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    for week in ["2024-10", "2023-W53", "2024-W1"] {
        let response = client
            .get(format!("{}/api/stats?week={week}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "week {week}");
    }
}

#[tokio::test]
async fn http_stats_default_to_current_week() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let stats: WeeklyStatsResponse = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(stats.week.contains("-W"));
    assert!(stats.start_date <= stats.end_date);

    let page = client
        .get(format!("{}/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(&stats.week));
}

#[tokio::test]
async fn http_legacy_store_is_migrated_at_startup() {
    let data_path = unique_data_path();
    std::fs::write(
        &data_path,
        r#"{"2024-03-04":{"Lunch":["Verdure",{"id":"Frutta","portion":"spoon"}],"Dinner":"oops"}}"#,
    )
    .unwrap();

    let server = spawn_server(data_path.clone()).await;
    let client = Client::new();

    let stats = weekly_stats(&client, &server.base_url, "2024-W10").await;
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.ranking[0].category_id, "Verdure");
    assert_eq!(stats.ranking[0].weighted_score, 5);

    add_entry(&client, &server.base_url, "2024-03-05", "Breakfast", "Latticini", "cup").await;
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&data_path).unwrap()).unwrap();
    assert_eq!(saved["version"], 2);
    assert_eq!(
        saved["days"]["2024-03-04"]["Lunch"][0],
        serde_json::json!({ "id": "Verdure", "portion": "plate" })
    );

    drop(server);
    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_put_day_replaces_meals() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    add_entry(&client, &server.base_url, "2024-06-03", "Lunch", "Dolci", "plate").await;

    let response = client
        .put(format!("{}/api/days/2024-06-03", server.base_url))
        .json(&serde_json::json!({
            "Breakfast": [{ "id": "Latticini", "portion": "cup" }],
            "Dinner": [{ "id": "Legumi" }]
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let day: DayLogResponse = response.json().await.unwrap();
    assert!(!day.meals.contains_key("Lunch"));
    assert_eq!(day.meals["Dinner"][0].portion, "plate");

    let stats = weekly_stats(&client, &server.base_url, "2024-W23").await;
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.ranking[0].category_id, "Legumi");
    assert!(stats.ranking.iter().all(|entry| entry.category_id != "Dolci"));
}

#[tokio::test]
async fn http_put_day_rejects_what_add_would_reject() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let bodies = [
        serde_json::json!({ "Lunch": [{ "id": "Pizza", "portion": "plate" }] }),
        serde_json::json!({ "Lunch": [{ "id": "Verdure", "portion": "bucket" }] }),
        serde_json::json!({ "Pranzo": [{ "id": "Verdure", "portion": "plate" }] }),
    ];
    for body in bodies {
        let response = client
            .put(format!("{}/api/days/2024-07-01", server.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
    }

    let day: DayLogResponse = client
        .get(format!("{}/api/days/2024-07-01", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(day.meals.is_empty());
}
