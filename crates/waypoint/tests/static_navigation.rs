mod common;

use common::{odds_page, PageFetcher};
use waypoint::locator::path;
use waypoint::{Locator, Navigator, ScrapeError, StaticNavigator};

const HOME: &str = "http://bets.example.com/";

fn site() -> PageFetcher {
    PageFetcher::new()
        .page(
            HOME,
            r#"<html><body><nav><a href="/football">Football</a><a href="/tennis">Tennis</a></nav></body></html>"#,
        )
        .page(
            "http://bets.example.com/football",
            r#"<html><body>
                 <ul class="competitions">
                   <li><a href="/football/wc"><span class="name">World Cup 2018</span><span class="count">64</span></a></li>
                 </ul>
               </body></html>"#,
        )
        .page(
            "http://bets.example.com/football/wc",
            &odds_page(&[("Germany", "9/2"), ("France", "11/2")]),
        )
}

#[tokio::test]
async fn test_reaches_terminal_locator_without_fetching_it() {
    let fetcher = site();
    let mut nav = StaticNavigator::new(fetcher.clone());

    let terminal = nav
        .navigate(&Locator::new(HOME), &path(["Football", "World Cup 2018"]))
        .await
        .unwrap();

    assert_eq!(terminal.as_str(), "http://bets.example.com/football/wc");
    assert_eq!(
        fetcher.fetched(),
        vec![HOME.to_string(), "http://bets.example.com/football".to_string()]
    );
}

#[tokio::test]
async fn test_missing_waypoint_names_label_and_page() {
    let mut nav = StaticNavigator::new(site());

    let err = nav
        .navigate(&Locator::new(HOME), &path(["Football", "NoSuchLink"]))
        .await
        .unwrap_err();

    match err {
        ScrapeError::Navigation { waypoint, location } => {
            assert_eq!(waypoint, "NoSuchLink");
            assert_eq!(location, "http://bets.example.com/football");
        }
        other => panic!("expected navigation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_navigation_halts_at_first_mismatch() {
    let fetcher = site();
    let mut nav = StaticNavigator::new(fetcher.clone());

    let err = nav
        .navigate(&Locator::new(HOME), &path(["Golf", "Football"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Navigation { ref waypoint, .. } if waypoint == "Golf"));
    assert_eq!(fetcher.fetched(), vec![HOME.to_string()]);
}

#[tokio::test]
async fn test_empty_path_returns_start() {
    let fetcher = site();
    let mut nav = StaticNavigator::new(fetcher.clone());
    let terminal = nav.navigate(&Locator::new(HOME), &[]).await.unwrap();
    assert_eq!(terminal.as_str(), HOME);
    assert!(fetcher.fetched().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_a_transport_error() {
    let fetcher = PageFetcher::new().page(HOME, r#"<a href="/broken">Football</a>"#);
    let mut nav = StaticNavigator::new(fetcher);

    let err = nav
        .navigate(&Locator::new(HOME), &path(["Football", "Outrights"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Transport(_)));
}

#[tokio::test]
async fn test_terminal_markup_fetches_terminal() {
    let mut nav = StaticNavigator::new(site());
    let markup = nav
        .terminal_markup(&Locator::new("http://bets.example.com/football/wc"))
        .await
        .unwrap();
    assert!(markup.contains("Germany"));
    assert_eq!(nav.strategy(), "static");
}
