use moviedb::MovieError;
use moviedb::query::*;
use moviedb::types::{Movie, MovieFilter, SortOrder};
use rand::{SeedableRng, rngs::StdRng};

// Helper function to create a test movie
fn movie(title: &str, year: i32, rating: f64) -> Movie {
    Movie::new(title, year, rating, None).unwrap()
}

fn titles(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.title.as_str()).collect()
}

fn collection() -> Vec<Movie> {
    vec![
        movie("The Matrix", 1999, 8.7),
        movie("Inception", 2010, 8.8),
        movie("The Room", 2003, 3.6),
        movie("Interstellar", 2014, 8.7),
        movie("Matrix Revolutions", 2003, 6.8),
    ]
}

#[test]
fn test_average_and_median() {
    let movies = collection();

    let avg = average(&movies).unwrap();
    assert!((avg - 7.32).abs() < 1e-9);
    assert_eq!(median(&movies).unwrap(), 8.7);

    // Even count averages the two middle ratings
    let even = vec![
        movie("A", 2000, 2.0),
        movie("B", 2000, 9.0),
        movie("C", 2000, 4.0),
        movie("D", 2000, 6.0),
    ];
    assert_eq!(median(&even).unwrap(), 5.0);
}

#[test]
fn test_aggregates_stay_within_bounds() {
    let samples = vec![
        collection(),
        vec![movie("Solo", 2018, 6.9)],
        vec![movie("Low", 1990, 0.0), movie("High", 1991, 10.0)],
    ];

    for movies in samples {
        let min = movies.iter().map(|m| m.rating).fold(f64::INFINITY, f64::min);
        let max = movies.iter().map(|m| m.rating).fold(f64::NEG_INFINITY, f64::max);

        let avg = average(&movies).unwrap();
        let med = median(&movies).unwrap();
        assert!(min <= avg && avg <= max);
        assert!(min <= med && med <= max);
    }
}

#[test]
fn test_empty_collection_errors() {
    assert!(matches!(average(&[]), Err(MovieError::EmptyCollection)));
    assert!(matches!(median(&[]), Err(MovieError::EmptyCollection)));
    assert!(matches!(stats(&[]), Err(MovieError::EmptyCollection)));

    let mut rng = StdRng::seed_from_u64(7);
    assert!(matches!(
        random_pick(&[], &mut rng),
        Err(MovieError::EmptyCollection)
    ));

    assert!(best(&[]).is_empty());
    assert!(worst(&[]).is_empty());
}

#[test]
fn test_best_and_worst_include_ties() {
    let mut movies = collection();
    movies.push(movie("Gigli", 2003, 3.6));
    movies[1].rating = 8.7;

    assert_eq!(
        titles(&best(&movies)),
        vec!["The Matrix", "Inception", "Interstellar"]
    );
    assert_eq!(titles(&worst(&movies)), vec!["The Room", "Gigli"]);
}

#[test]
fn test_random_pick_is_member_and_seeded() {
    let movies = collection();

    let mut rng = StdRng::seed_from_u64(42);
    let first = random_pick(&movies, &mut rng).unwrap();
    assert!(movies.contains(&first));

    // Same seed, same pick
    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(random_pick(&movies, &mut rng).unwrap(), first);

    // Every movie can come up
    let mut rng = StdRng::seed_from_u64(1);
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..500 {
        seen.insert(random_pick(&movies, &mut rng).unwrap().title);
    }
    assert_eq!(seen.len(), movies.len());
}

#[test]
fn test_search_by_title() {
    let movies = collection();

    assert_eq!(
        titles(&search_by_title(&movies, "matrix", true)),
        vec!["The Matrix", "Matrix Revolutions"]
    );
    assert_eq!(
        titles(&search_by_title(&movies, "matrix", false)),
        Vec::<&str>::new()
    );
    assert_eq!(
        titles(&search_by_title(&movies, "Matrix", false)),
        vec!["The Matrix", "Matrix Revolutions"]
    );
    assert!(search_by_title(&movies, "Godfather", true).is_empty());
    assert_eq!(search_by_title(&movies, "", true).len(), movies.len());
}

#[test]
fn test_sort_by_rating_is_stable() {
    let movies = vec![
        movie("Seven", 1995, 7.0),
        movie("First Nine", 2001, 9.0),
        movie("Second Nine", 2002, 9.0),
        movie("Three", 2003, 3.0),
    ];

    assert_eq!(
        titles(&sort_by_rating(&movies, SortOrder::Descending)),
        vec!["First Nine", "Second Nine", "Seven", "Three"]
    );
    assert_eq!(
        titles(&sort_by_rating(&movies, SortOrder::Ascending)),
        vec!["Three", "Seven", "First Nine", "Second Nine"]
    );

    // Input stays untouched
    assert_eq!(movies[0].title, "Seven");
}

#[test]
fn test_sort_by_year_keeps_ties_in_input_order() {
    let movies = collection();

    assert_eq!(
        titles(&sort_by_year(&movies, SortOrder::Descending)),
        vec![
            "Interstellar",
            "Inception",
            "The Room",
            "Matrix Revolutions",
            "The Matrix"
        ]
    );
    assert_eq!(
        titles(&sort_by_year(&movies, SortOrder::Ascending)),
        vec![
            "The Matrix",
            "The Room",
            "Matrix Revolutions",
            "Inception",
            "Interstellar"
        ]
    );
}

#[test]
fn test_filter_min_rating() {
    let movies = vec![
        movie("Five", 2000, 5.0),
        movie("Eight", 2001, 8.0),
        movie("Nine", 2002, 9.2),
    ];
    let criteria = MovieFilter {
        min_rating: Some(8.0),
        ..Default::default()
    };

    assert_eq!(titles(&filter(&movies, &criteria)), vec!["Eight", "Nine"]);
}

#[test]
fn test_filter_bounds_are_inclusive_and_combined() {
    let movies = collection();

    let criteria = MovieFilter {
        min_rating: Some(6.8),
        start_year: Some(2003),
        end_year: Some(2010),
    };
    assert_eq!(
        titles(&filter(&movies, &criteria)),
        vec!["Inception", "Matrix Revolutions"]
    );

    assert_eq!(filter(&movies, &MovieFilter::default()), movies);

    let nothing = MovieFilter {
        start_year: Some(2020),
        ..Default::default()
    };
    assert!(filter(&movies, &nothing).is_empty());
}

#[test]
fn test_stats_bundle() {
    let stats = stats(&collection()).unwrap();
    assert_eq!(stats.count, 5);
    assert_eq!(stats.median, 8.7);
    assert_eq!(titles(&stats.best), vec!["Inception"]);
    assert_eq!(titles(&stats.worst), vec!["The Room"]);
}

#[test]
fn test_negative_zero_rating_ties_with_zero() {
    let mut neg_zero = movie("NegZero", 2001, 0.0);
    neg_zero.rating = -0.0;
    let movies = vec![movie("Zero", 2000, 0.0), neg_zero, movie("Five", 2002, 5.0)];

    assert_eq!(titles(&worst(&movies)), vec!["Zero", "NegZero"]);
    assert_eq!(
        titles(&sort_by_rating(&movies, SortOrder::Ascending)),
        vec!["Zero", "NegZero", "Five"]
    );
    assert_eq!(
        titles(&sort_by_rating(&movies, SortOrder::Descending)),
        vec!["Five", "Zero", "NegZero"]
    );
}
