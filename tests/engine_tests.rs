use catalogue_recommender::{
    error::AppError,
    models::CatalogueItem,
    services::{
        sources::records::parse_catalogue_csv, AmbiguityPolicy, CatalogueSnapshot, EngineSettings,
    },
};

const SAMPLE_CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,TV Show,Sex Education,,\"Asa Butterfield, Gillian Anderson\",United Kingdom,\"January 17, 2020\",2020,TV-MA,2 Seasons,\"British TV Shows, International TV Shows, TV Comedies\",Insecure Otis has all the answers when it comes to sex advice
s2,TV Show,Chewing Gum,,Michaela Coel,United Kingdom,\"April 1, 2017\",2017,TV-MA,2 Seasons,\"British TV Shows, International TV Shows, TV Comedies\",A sheltered shop assistant wants to have sex
s3,TV Show,Sex Explained,,,United States,\"January 2, 2020\",2020,TV-14,1 Season,Docuseries,Sex advice explained with science
s4,Movie,Roma,Alfonso Cuarón,Yalitza Aparicio,Mexico,\"December 14, 2018\",2018,R,135 min,\"Dramas, Independent Movies\",A domestic worker in Mexico City
s5,Movie,,,,,,,,,,
";

fn sample() -> Vec<CatalogueItem> {
    parse_catalogue_csv(SAMPLE_CSV.as_bytes()).unwrap()
}

#[test]
fn test_csv_to_recommendations() {
    let snapshot = CatalogueSnapshot::build(sample(), EngineSettings::default()).unwrap();
    let recs = snapshot.recommend("Sex Education", 3).unwrap();

    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0], "Chewing Gum");
    assert!(!recs.contains(&"Sex Education".to_string()));
}

#[test]
fn test_matrix_properties() {
    let snapshot = CatalogueSnapshot::build(sample(), EngineSettings::default()).unwrap();
    let n = snapshot.items().len();

    for i in 0..n {
        let own = snapshot.similarity(i, i);
        if i == 4 {
            // blank row has no terms
            assert_eq!(own, 0.0);
        } else {
            assert!((own - 1.0).abs() < 1e-9);
        }
        for j in 0..n {
            let s = snapshot.similarity(i, j);
            assert_eq!(s, snapshot.similarity(j, i));
            assert!((0.0..=1.0).contains(&s));
        }
    }
}

#[test]
fn test_blank_row_recommends_in_index_order() {
    let snapshot = CatalogueSnapshot::build(sample(), EngineSettings::default()).unwrap();
    assert_eq!(
        snapshot.recommend("", 4).unwrap(),
        vec!["Sex Education", "Chewing Gum", "Sex Explained", "Roma"]
    );
}

#[test]
fn test_never_more_than_catalogue() {
    let snapshot = CatalogueSnapshot::build(sample(), EngineSettings::default()).unwrap();
    assert_eq!(snapshot.recommend("Roma", 50).unwrap().len(), 4);

    let strict = EngineSettings {
        strict_count: true,
        ..Default::default()
    };
    let snapshot = CatalogueSnapshot::build(sample(), strict).unwrap();
    assert!(matches!(
        snapshot.recommend("Roma", 50),
        Err(AppError::InsufficientData {
            requested: 50,
            available: 4
        })
    ));
}

#[test]
fn test_source_parity_merges_adjacent_fields() {
    let items = vec![
        CatalogueItem {
            title: "A".to_string(),
            listed_in: Some("Comedy".to_string()),
            description: Some("funny".to_string()),
            ..Default::default()
        },
        CatalogueItem {
            title: "B".to_string(),
            listed_in: Some("Comedy".to_string()),
            description: Some("funny".to_string()),
            ..Default::default()
        },
    ];

    let settings = EngineSettings {
        field_separator: String::new(),
        ambiguity: AmbiguityPolicy::Reject,
        strict_count: false,
    };
    let snapshot = CatalogueSnapshot::build(items, settings).unwrap();

    // "AComedyfunny" and "BComedyfunny" share no token
    assert_eq!(snapshot.similarity(0, 1), 0.0);
    assert_eq!(snapshot.vector_space().dimensions(), 2);
}
