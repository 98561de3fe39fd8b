// Integration tests for wander: CSV tables on disk through the offline
// builder and artifact store into the online recommender.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use wander_core::{Catalog, Query, Recommender, SimilarityHint};
use wander_index::{build_model, ModelStore};

/// Write the fixture tables into `dir` and return their paths.
fn seed_tables(dir: &Path) -> (PathBuf, PathBuf) {
    let destinations = dir.join("Destinations.csv");
    let users = dir.join("Users.csv");
    fs::write(
        &destinations,
        "Name,District,State,Category,BestTimeToVisit,PopularityScore\n\
         Goa Beaches,North Goa,Goa,\"Beach, Adventure\",Nov-Feb,0.9\n\
         Kovalam Beach,Thiruvananthapuram,Kerala,\"Beach, Culture\",Sep-Mar,0.5\n\
         Jaipur City,Jaipur,Rajasthan,Culture,Oct-Mar,0.8\n\
         Rishikesh Rafting,Dehradun,Uttarakhand,\"Adventure, Nature\",Sep-Jun,0.5\n",
    )
    .unwrap();
    fs::write(
        &users,
        "UserID,Name,Gender,Location,TravelPreferences,Number of Adults,Number of Children\n\
         101,Asha,F,Pune,\"Culture, Nature\",2,1\n\
         102,Vikram,M,Delhi,Beach,1,0\n",
    )
    .unwrap();
    (destinations, users)
}

fn load_fixture(dir: &Path) -> Arc<Catalog> {
    let (destinations, users) = seed_tables(dir);
    Arc::new(Catalog::load(&destinations, &users, Some(7)).unwrap())
}

#[test]
fn test_catalog_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());

    assert_eq!(catalog.destinations().len(), 4);
    assert_eq!(catalog.users().len(), 2);

    let goa = catalog.destination("Goa Beaches").unwrap();
    assert_eq!(goa.district, "North Goa");
    assert_eq!(goa.popularity_score, 0.9);

    let vikram = catalog.user("102").unwrap();
    assert_eq!(vikram.name, "Vikram");
    assert_eq!(vikram.travel_preferences, "Beach");
    assert_eq!(vikram.number_of_adults, 1);

    assert_eq!(
        catalog.states(),
        vec!["Goa", "Kerala", "Rajasthan", "Uttarakhand"]
    );
    assert_eq!(
        catalog.category_labels(),
        vec!["adventure", "beach", "culture", "nature"]
    );
}

#[test]
fn test_build_save_and_reload_model() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());

    let built = build_model(&catalog);
    assert_eq!(built.len(), 4);
    assert_eq!(built.similarity.rows(), built.similarity.cols());

    let store = ModelStore::new(dir.path().join("models"));
    store.save(&built).unwrap();
    let loaded = store.load().unwrap().unwrap();

    assert_eq!(loaded.destination_index, built.destination_index);
    assert_eq!(loaded.similarity, built.similarity);

    // Shared label and shared token versus nothing in common
    let near = loaded.pair_score("Goa Beaches", "Kovalam Beach").unwrap();
    let far = loaded.pair_score("Goa Beaches", "Jaipur City").unwrap();
    assert!(near > far);
    assert!(loaded.pair_score("Goa Beaches", "Nowhere").is_none());
}

#[test]
fn test_by_destination_over_reloaded_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());

    let store = ModelStore::new(dir.path().join("models"));
    store.save(&build_model(&catalog)).unwrap();
    let model = Arc::new(store.load().unwrap().unwrap());

    let recommender =
        Recommender::new(catalog.clone()).with_similarity_hint(model.clone());
    let results = recommender.recommend(&Query::ByDestination {
        name: "Goa Beaches".to_string(),
    });

    // Jaipur shares no label and the anchor never recommends itself
    assert_eq!(results.len(), 2);
    for rec in &results {
        assert_eq!(rec.match_score, 0.5);
        assert_eq!(rec.popularity_score, 0.5);
    }

    // Match score and popularity are tied, so the model orders the pair
    let kovalam = model.pair_score("Goa Beaches", "Kovalam Beach").unwrap();
    let rishikesh = model
        .pair_score("Goa Beaches", "Rishikesh Rafting")
        .unwrap();
    let expected_first = if kovalam >= rishikesh {
        "Kovalam Beach"
    } else {
        "Rishikesh Rafting"
    };
    assert_eq!(results[0].name, expected_first);
}

#[test]
fn test_by_user_ranks_on_popularity() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());

    // Asha's stored preferences are "Culture, Nature"
    let recommender = Recommender::new(catalog);
    let results = recommender.recommend(&Query::ByUser {
        user_id: "101".to_string(),
    });

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Jaipur City", "Kovalam Beach", "Rishikesh Rafting"]);
    assert!(results.iter().all(|r| r.match_score == 0.5));
}

#[test]
fn test_by_custom_normalizes_input_and_filters_state() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());
    let recommender = Recommender::new(catalog);

    // Mixed-case input with stray whitespace still matches
    let results = recommender.recommend(&Query::ByCustom {
        preferences: " Beach ".to_string(),
        state: None,
    });
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Goa Beaches", "Kovalam Beach"]);

    let kerala_only = recommender.recommend(&Query::ByCustom {
        preferences: "Beach".to_string(),
        state: Some("Kerala".to_string()),
    });
    assert_eq!(kerala_only.len(), 1);
    assert_eq!(kerala_only[0].name, "Kovalam Beach");
}

#[test]
fn test_unknown_anchors_yield_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());
    let recommender = Recommender::new(catalog);

    let by_name = recommender.recommend(&Query::ByDestination {
        name: "Atlantis".to_string(),
    });
    assert!(by_name.is_empty());

    let by_user = recommender.recommend(&Query::ByUser {
        user_id: "999".to_string(),
    });
    assert!(by_user.is_empty());
}

#[test]
fn test_recommendation_serializes_with_table_headers() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_fixture(dir.path());
    let recommender = Recommender::new(catalog);

    let results = recommender.recommend(&Query::ByCustom {
        preferences: "beach".to_string(),
        state: None,
    });
    let value = serde_json::to_value(&results[0]).unwrap();
    let object = value.as_object().unwrap();

    for key in [
        "Name",
        "District",
        "State",
        "Category",
        "BestTimeToVisit",
        "PopularityScore",
        "MatchScore",
    ] {
        assert!(object.contains_key(key), "missing key {}", key);
    }
    assert_eq!(object["Name"], "Goa Beaches");
    assert_eq!(object["MatchScore"], 1.0);
}
