//! End-to-end behavior of `LocalGateway` through the gateway traits,
//! including realtime whole-collection delivery.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tokio::sync::mpsc;

use scape_core::entities::{ReportDraft, ScentPatch};
use scape_core::enums::SmellCategory;
use scape_core::validation::ScentForm;
use scape_db::LocalGateway;
use scape_gateway::realtime::subscribe_reports;
use scape_gateway::{LibraryGateway, ReportGateway};

async fn seeded_library() -> LocalGateway {
    let db = LocalGateway::in_memory().await.unwrap();
    for (name, category, description) in [
        ("Vetiver", "woody", "Earthy grass root"),
        ("Bergamot", "citrus", "Bright peel oil"),
        ("Ambergris", "animalic", "Marine and sweet"),
    ] {
        let form = ScentForm {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            image: String::new(),
        };
        db.add_scent(&form.validate().unwrap()).await.unwrap();
    }
    db
}

#[tokio::test]
async fn library_lists_by_name() {
    let db = seeded_library().await;
    let names: Vec<_> = db
        .list_scents()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Ambergris", "Bergamot", "Vetiver"]);
}

#[rstest]
#[case("PEEL", &["Bergamot"])]
#[case("vet", &["Vetiver"])]
#[case("", &["Ambergris", "Bergamot", "Vetiver"])]
#[case("lavender", &[])]
#[tokio::test]
async fn library_search(#[case] term: &str, #[case] expected: &[&str]) {
    let db = seeded_library().await;
    let names: Vec<_> = db
        .search_scents(term)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn library_update_and_remove() {
    let db = seeded_library().await;
    let woody = db.scents_by_category("woody").await.unwrap();
    let id = woody[0].id;

    let patch = ScentPatch {
        description: Some("Smoky root".into()),
        ..ScentPatch::default()
    };
    let updated = db.update_scent(id, &patch).await.unwrap();
    assert_eq!(updated.description, "Smoky root");
    assert_eq!(updated.name, "Vetiver");

    let unchanged = db.update_scent(id, &ScentPatch::default()).await.unwrap();
    assert_eq!(unchanged, updated);

    db.remove_scent(id).await.unwrap();
    assert_eq!(db.list_scents().await.unwrap().len(), 2);
}

#[tokio::test]
async fn realtime_delivers_whole_collection_after_each_write() {
    let db = Arc::new(LocalGateway::in_memory().await.unwrap());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = subscribe_reports(Arc::clone(&db), move |reports| {
        let _ = tx.send(reports);
    });

    let draft = ReportDraft {
        title: "Low tide".into(),
        description: String::new(),
        category: SmellCategory::Nature,
        intensity: 6,
        latitude: 42.36,
        longitude: -71.05,
        address: None,
        contributor: None,
    };
    db.add_report(&draft).await.unwrap();
    db.add_report(&ReportDraft {
        title: "Diesel".into(),
        category: SmellCategory::Chemical,
        ..draft.clone()
    })
    .await
    .unwrap();

    let mut latest = Vec::new();
    while latest.len() < 2 {
        latest = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
    }
    assert_eq!(latest[0].title, "Diesel");
    assert!(subscription.is_active());

    subscription.unsubscribe();
}

#[rstest]
#[case("CAFÉ", 1)]
#[case("café", 1)]
#[case("ÉSPRESSO", 1)]
#[case("cafe", 0)]
#[tokio::test]
async fn report_search_folds_non_ascii_case(#[case] term: &str, #[case] expected: usize) {
    let db = LocalGateway::in_memory().await.unwrap();
    db.add_report(&ReportDraft {
        title: "Café roaster".into(),
        description: "Burnt éspresso drifting out the door".into(),
        category: SmellCategory::Food,
        intensity: 5,
        latitude: 48.85,
        longitude: 2.35,
        address: None,
        contributor: None,
    })
    .await
    .unwrap();

    assert_eq!(db.search_reports(term).await.unwrap().len(), expected);
}
