// Shared test helpers: fake procfs trees, feeds, capacity queries and renderer
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use paperdash::error::SampleError;
use paperdash::feeds::{QuoteFeed, WeatherFeed};
use paperdash::models::{Frame, StockQuote, WeatherReading};
use paperdash::renderer::Renderer;
use paperdash::telemetry::TelemetryRepo;
use paperdash::telemetry::disk::{Capacity, CapacityQuery};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const STAT: &str = "cpu  100 0 50 800 50 0 0 0 0 0\ncpu0 100 0 50 800 50 0 0 0 0 0\nctxt 1\n";
pub const MEMINFO: &str = "MemTotal:       1000 kB\nMemFree:         100 kB\nMemAvailable:    400 kB\nBuffers:          50 kB\nCached:           50 kB\n";

/// 2024-01-01 at `hour:minute:second`.
pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// Mount paths the fake host reports as live directories.
pub const FAKE_DIRS: [&str; 3] = ["/srv/data", "/srv/data/cache", "/srv/backup"];

pub const MOUNTS: &str = "proc /proc proc rw 0 0\n\
                          /dev/sda1 /srv/data ext4 rw 0 0\n\
                          tmpfs /srv/data/cache tmpfs rw 0 0\n\
                          /dev/sdc1 /srv/gone ext4 rw 0 0\n\
                          /dev/sdb1 /srv/backup xfs rw 0 0\n";

pub fn fake_is_dir(path: &Path) -> bool {
    FAKE_DIRS.iter().any(|dir| path == Path::new(dir))
}

/// A fake procfs root whose `mounts` lists fixed `/srv` paths.
///
/// `/srv/gone` is listed but is not a directory on the fake host.
pub struct FakeProc {
    pub dir: tempfile::TempDir,
}

impl FakeProc {
    pub fn new() -> Self {
        let proc = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        proc.write("stat", STAT);
        proc.write("meminfo", MEMINFO);
        proc.write("mounts", MOUNTS);
        proc
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Repo over this root with no CPU window, fixed capacities and the fake dir check.
    pub fn repo(&self) -> TelemetryRepo<FixedCapacity> {
        TelemetryRepo::with_capacity_query(self.root(), Duration::ZERO, self.capacities())
            .with_dir_check(fake_is_dir)
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).unwrap();
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).unwrap();
    }

    /// `data` (100 total / 50 free) and `backup` (300 / 270) blend to 20%.
    /// `gone` is full, so counting it would show.
    pub fn capacities(&self) -> FixedCapacity {
        FixedCapacity::new([
            (PathBuf::from("/srv/data"), capacity(100, 50)),
            (PathBuf::from("/srv/gone"), capacity(100, 0)),
            (PathBuf::from("/srv/backup"), capacity(300, 270)),
        ])
    }
}

pub fn capacity(total_bytes: u64, free_bytes: u64) -> Capacity {
    Capacity {
        total_bytes,
        free_bytes,
    }
}

/// Capacity per path; unknown paths fail like an unreachable device.
#[derive(Debug, Default)]
pub struct FixedCapacity {
    by_path: HashMap<PathBuf, Capacity>,
}

impl FixedCapacity {
    pub fn new(entries: impl IntoIterator<Item = (PathBuf, Capacity)>) -> Self {
        Self {
            by_path: entries.into_iter().collect(),
        }
    }
}

impl CapacityQuery for FixedCapacity {
    fn capacity(&self, path: &Path) -> Result<Capacity, SampleError> {
        self.by_path
            .get(path)
            .copied()
            .ok_or_else(|| SampleError::Query {
                path: path.to_path_buf(),
                source: std::io::Error::other("device unreachable"),
            })
    }
}

pub fn weather(temperature_c: f64, code: u16) -> WeatherReading {
    WeatherReading {
        temperature_c,
        relative_humidity: 65,
        code,
    }
}

pub fn quote(symbol: &str, price: f64, previous_close: f64) -> StockQuote {
    StockQuote {
        symbol: symbol.into(),
        price,
        previous_close,
    }
}

/// Weather feed returning whatever is currently set; `None` fails.
#[derive(Clone, Default)]
pub struct FakeWeather {
    pub reading: Arc<Mutex<Option<WeatherReading>>>,
    pub calls: Arc<AtomicUsize>,
    pub delay: Option<Duration>,
}

impl FakeWeather {
    pub fn returning(reading: WeatherReading) -> Self {
        let feed = Self::default();
        feed.set(Some(reading));
        feed
    }

    pub fn set(&self, reading: Option<WeatherReading>) {
        *self.reading.lock().unwrap() = reading;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WeatherFeed for FakeWeather {
    async fn current(&self) -> anyhow::Result<WeatherReading> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reading = self.reading.lock().unwrap().clone();
        reading.ok_or_else(|| anyhow::anyhow!("weather service unavailable"))
    }
}

/// Quote feed keyed by symbol; missing symbols fail.
#[derive(Clone, Default)]
pub struct FakeQuotes {
    pub quotes: Arc<Mutex<HashMap<String, StockQuote>>>,
    pub calls: Arc<AtomicUsize>,
    pub delay: Option<Duration>,
}

impl FakeQuotes {
    pub fn with(quotes: impl IntoIterator<Item = StockQuote>) -> Self {
        let feed = Self::default();
        for q in quotes {
            feed.set(q);
        }
        feed
    }

    pub fn set(&self, quote: StockQuote) {
        self.quotes
            .lock()
            .unwrap()
            .insert(quote.symbol.clone(), quote);
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn remove(&self, symbol: &str) {
        self.quotes.lock().unwrap().remove(symbol);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuoteFeed for FakeQuotes {
    async fn quote(&self, symbol: &str) -> anyhow::Result<StockQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let quote = self.quotes.lock().unwrap().get(symbol).cloned();
        quote.ok_or_else(|| anyhow::anyhow!("no quote for {}", symbol))
    }
}

/// Records frames; can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Arc<Mutex<Vec<Frame>>>,
    pub fail: Arc<AtomicBool>,
    pub shutdowns: Arc<AtomicUsize>,
}

impl RecordingRenderer {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Frame {
        self.frames().last().cloned().expect("at least one frame")
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("display busy");
        }
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }

    fn shutdown(&mut self) -> anyhow::Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
