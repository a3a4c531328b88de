use std::{num::NonZeroU32, sync::OnceLock, time::Duration};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use governor::{
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::InMemoryState,
};
use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

use crate::date::{long_date, week_slug};
use crate::parse::menu_page::{fnwi, het_gerecht, radboud_umc, refter};
use crate::supplier::{Supplier, SupplierKey};

/// Where a supplier's menu comes from.
///
/// Implementations never fail: anything that goes wrong is an empty menu.
#[allow(async_fn_in_trait)]
pub trait MenuFetcher {
    async fn fetch_menu(&self, supplier: &Supplier, dt: NaiveDateTime) -> Vec<String>;
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn make_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().gzip(true).timeout(timeout).build()
}

/// Base URLs of the supplier pages. Dated parts are appended per request.
#[derive(Debug, Clone)]
pub struct Sources {
    het_gerecht: Url,
    radboud_umc: Url,
    refter: Url,
    fnwi: Url,
}

impl Sources {
    pub fn new() -> crate::Result<Self> {
        Ok(Self {
            het_gerecht: Url::parse(
                "https://www.ru.nl/facilitairbedrijf/horeca/het-gerecht-grotiusgebouw/",
            )?,
            radboud_umc: Url::parse(
                "https://www.radboudumc.nl/patientenzorg/voorzieningen/eten-en-drinken/menu-van-de-dag/",
            )?,
            refter: Url::parse("https://www.ru.nl/facilitairbedrijf/horeca/refter/")?,
            fnwi: Url::parse("https://www.ru.nl/facilitairbedrijf/horeca/restaurant-fnwi/")?,
        })
    }

    /// Every supplier served from below one base, e.g. a local test server.
    #[cfg(test)]
    fn all_at(base: &Url) -> Self {
        Self {
            het_gerecht: base.clone(),
            radboud_umc: base.clone(),
            refter: base.clone(),
            fnwi: base.clone(),
        }
    }

    /// The page holding `key`'s menu for `date`, or `None` when there is nothing to download.
    pub fn menu_url(&self, key: SupplierKey, date: NaiveDate) -> crate::Result<Option<Url>> {
        let url = match key {
            // weekly pages, e.g. menu-14-18-januari/
            SupplierKey::Gerecht => self.het_gerecht.join(&format!("menu-{}/", week_slug(date)))?,
            SupplierKey::Fnwi => self.fnwi.join(&format!("menu-{}/", week_slug(date)))?,
            // daily pages, e.g. donderdag-17-januari
            SupplierKey::Umc => self.radboud_umc.join(&long_date(date).replace(' ', "-"))?,
            SupplierKey::Refter => self.refter.join("menu-soep-week/")?,
            SupplierKey::Fest => return Ok(None),
        };
        Ok(Some(url))
    }
}

static RATE_LIMIT: u32 = 5;
static DELAY_JITTER_MS: u64 = 250;
static RATE_LIMITER: OnceLock<
    governor::RateLimiter<
        governor::state::NotKeyed,
        InMemoryState,
        QuantaClock,
        NoOpMiddleware<QuantaInstant>,
    >,
> = OnceLock::new();

#[instrument(skip(client, url), fields(url = %url), level = Level::TRACE)]
pub async fn fetch_page(client: &Client, url: Url) -> crate::Result<String> {
    let rate_limiter = RATE_LIMITER.get_or_init(|| {
        governor::RateLimiter::direct(governor::Quota::per_second(
            NonZeroU32::new(RATE_LIMIT).unwrap_or(NonZeroU32::MIN),
        ))
    });
    let jitter = governor::Jitter::new(Duration::ZERO, Duration::from_millis(DELAY_JITTER_MS));
    rate_limiter.until_ready_with_jitter(jitter).await;

    log::info!("Requesting: {url}");
    let start = std::time::Instant::now();
    let res = client.get(url).send().await?.error_for_status()?;
    let text = res.text().await?;
    log::trace!("Got menu page in \t {:?}", start.elapsed());
    Ok(text)
}

/// De Fest has no menu page; it always serves the same things, with a daily deal.
pub fn fest_menu(date: NaiveDate) -> Vec<String> {
    let mut lines = vec!["Ook vandaag maakt de Fest weer lekkere frietjes, pizza's, enzovoort.".to_owned()];
    match date.weekday() {
        Weekday::Mon | Weekday::Tue => lines.push(
            "Vandaag is het ook nog eens pizzadag: alle pizza's tussen de 6 en 8 euro!".to_owned(),
        ),
        Weekday::Wed | Weekday::Thu => lines.push(
            "Vandaag is het ook nog eens schoteldag: alle schotels 2 euro korting!".to_owned(),
        ),
        Weekday::Fri | Weekday::Sat | Weekday::Sun => {}
    }
    lines
}

/// Downloads and scrapes the supplier pages.
#[derive(Debug, Clone)]
pub struct HttpMenuFetcher {
    client: Client,
    sources: Sources,
}

impl HttpMenuFetcher {
    pub const fn new(client: Client, sources: Sources) -> Self {
        Self { client, sources }
    }

    async fn try_fetch_menu(&self, key: SupplierKey, date: NaiveDate) -> crate::Result<Vec<String>> {
        let Some(url) = self.sources.menu_url(key, date)? else {
            return Ok(fest_menu(date));
        };
        let page = fetch_page(&self.client, url).await?;
        let lines = match key {
            SupplierKey::Gerecht => het_gerecht::parse(&page, date)?,
            SupplierKey::Umc => radboud_umc::parse(&page)?,
            SupplierKey::Refter => refter::parse(&page, date)?,
            SupplierKey::Fnwi => fnwi::parse(&page, date)?,
            SupplierKey::Fest => fest_menu(date),
        };
        Ok(lines)
    }
}

impl MenuFetcher for HttpMenuFetcher {
    async fn fetch_menu(&self, supplier: &Supplier, dt: NaiveDateTime) -> Vec<String> {
        match self.try_fetch_menu(supplier.key(), dt.date()).await {
            Ok(lines) => lines,
            Err(e) => {
                log::warn!("Could not get the menu for {}: {e}", supplier.name());
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Serves `body` with `status` to a single request and reports the requested path.
    async fn serve_once(status: &'static str, body: String) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
                .lines()
                .next()
                .unwrap_or_default()
                .to_owned()
        });
        (format!("http://{addr}/").parse().unwrap(), handle)
    }

    #[test]
    fn test_menu_urls() {
        let sources = Sources::new().unwrap();
        let thursday = date(2019, 1, 17);
        assert_eq!(
            sources.menu_url(SupplierKey::Gerecht, thursday).unwrap().unwrap().as_str(),
            "https://www.ru.nl/facilitairbedrijf/horeca/het-gerecht-grotiusgebouw/menu-14-18-januari/"
        );
        assert_eq!(
            sources.menu_url(SupplierKey::Umc, thursday).unwrap().unwrap().as_str(),
            "https://www.radboudumc.nl/patientenzorg/voorzieningen/eten-en-drinken/menu-van-de-dag/donderdag-17-januari"
        );
        assert_eq!(
            sources.menu_url(SupplierKey::Refter, thursday).unwrap().unwrap().as_str(),
            "https://www.ru.nl/facilitairbedrijf/horeca/refter/menu-soep-week/"
        );
        assert_eq!(
            sources.menu_url(SupplierKey::Fnwi, date(2024, 3, 25)).unwrap().unwrap().as_str(),
            "https://www.ru.nl/facilitairbedrijf/horeca/restaurant-fnwi/menu-25-29-maart/"
        );
        assert!(sources.menu_url(SupplierKey::Fest, thursday).unwrap().is_none());
    }

    #[test]
    fn test_fest_menu_daily_deals() {
        assert_eq!(fest_menu(date(2024, 4, 8)).len(), 2);
        assert!(fest_menu(date(2024, 4, 9))[1].contains("pizzadag"));
        assert!(fest_menu(date(2024, 4, 11))[1].contains("schoteldag"));
        assert_eq!(fest_menu(date(2024, 4, 12)).len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_and_parse() {
        let html = std::fs::read_to_string("./src/parse/html_examples/radboud_umc.html").unwrap();
        let (base, server) = serve_once("200 OK", html).await;
        let fetcher = HttpMenuFetcher::new(make_client(DEFAULT_TIMEOUT).unwrap(), Sources::all_at(&base));
        let dt = date(2019, 1, 17).and_hms_opt(12, 0, 0).unwrap();
        let menu = fetcher
            .fetch_menu(&Supplier::new(SupplierKey::Umc), dt)
            .await;
        assert_eq!(menu.len(), 3);
        assert_eq!(menu[0], "Soep: Tomatensoep, Mosterdsoep");
        assert_eq!(server.await.unwrap(), "GET /donderdag-17-januari HTTP/1.1");
    }

    #[tokio::test]
    async fn test_http_error_is_empty_menu() {
        let (base, _server) = serve_once("404 Not Found", "weg".to_owned()).await;
        let fetcher = HttpMenuFetcher::new(make_client(DEFAULT_TIMEOUT).unwrap(), Sources::all_at(&base));
        let dt = date(2019, 1, 16).and_hms_opt(12, 0, 0).unwrap();
        assert!(fetcher
            .fetch_menu(&Supplier::new(SupplierKey::Gerecht), dt)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_page_is_empty_menu() {
        let (base, _server) = serve_once("200 OK", "<html><body>Onderhoud</body></html>".to_owned()).await;
        let fetcher = HttpMenuFetcher::new(make_client(DEFAULT_TIMEOUT).unwrap(), Sources::all_at(&base));
        let dt = date(2019, 1, 15).and_hms_opt(12, 0, 0).unwrap();
        assert!(fetcher
            .fetch_menu(&Supplier::new(SupplierKey::Refter), dt)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_empty_menu() {
        // accepts the connection but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base: Url = format!("http://{}/", listener.local_addr().unwrap()).parse().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });
        let client = make_client(Duration::from_millis(200)).unwrap();
        let fetcher = HttpMenuFetcher::new(client, Sources::all_at(&base));
        let dt = date(2024, 3, 26).and_hms_opt(12, 0, 0).unwrap();
        assert!(fetcher
            .fetch_menu(&Supplier::new(SupplierKey::Fnwi), dt)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_fest_needs_no_network() {
        let fetcher = HttpMenuFetcher::new(
            make_client(DEFAULT_TIMEOUT).unwrap(),
            Sources::all_at(&"http://127.0.0.1:9/".parse().unwrap()),
        );
        let dt = date(2024, 4, 8).and_hms_opt(12, 0, 0).unwrap();
        let menu = fetcher.fetch_menu(&Supplier::new(SupplierKey::Fest), dt).await;
        assert_eq!(menu, fest_menu(dt.date()));
    }
}
