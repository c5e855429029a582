//! Seed loading against the shipped breeds file and scoped server settings.

mod support;

use std::path::{Path, PathBuf};

use pets_backend::config::ServerConfig;
use pets_backend::db::repositories::LocalRepository;
use pets_backend::db::seed::parse_seed_file;
use pets_backend::db::{load_pets_table, PetRepository, PetSearch, SearchCriterion};

fn shipped_seed_file() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("seeds/breeds.csv")
}

#[tokio::test]
async fn test_shipped_seed_file_parses() {
    let rows = parse_seed_file(&shipped_seed_file()).await.unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| !r.species.is_empty() && !r.name.is_empty()));
    assert!(rows.iter().any(|r| r.species == "dog"));
    assert!(rows.iter().any(|r| r.species == "cat"));
}

#[tokio::test]
async fn test_load_shipped_seed_file_once() {
    let repo = LocalRepository::new();
    let expected = parse_seed_file(&shipped_seed_file())
        .await
        .unwrap()
        .len() as u64;

    let inserted = load_pets_table(&repo, shipped_seed_file()).await.unwrap();
    assert_eq!(inserted, expected);
    assert_eq!(repo.count().await.unwrap(), expected);

    let again = load_pets_table(&repo, shipped_seed_file()).await.unwrap();
    assert_eq!(again, 0);
    assert_eq!(repo.count().await.unwrap(), expected);
}

#[tokio::test]
async fn test_seeded_store_is_searchable() {
    let repo = LocalRepository::new();
    load_pets_table(&repo, shipped_seed_file()).await.unwrap();

    let search = PetSearch::new()
        .and(SearchCriterion::Species("cat".to_string()))
        .and(SearchCriterion::MinWeight(7000));
    let heavy_cats = repo.search(&search).await.unwrap();
    assert!(!heavy_cats.is_empty());
    for pet in heavy_cats {
        assert_eq!(pet.species, "cat");
        assert!(pet.average_male_adult_weight >= 7000 || pet.average_female_adult_weight >= 7000);
    }
}

#[test]
fn test_server_config_defaults() {
    support::with_scoped_env(
        &[
            ("HOST", None),
            ("PORT", None),
            ("SEED_FILE", None),
            ("REPOSITORY_CONFIG", None),
        ],
        || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config, ServerConfig::default());
            assert_eq!(config.port, 5000);
            assert_eq!(config.seed_file, PathBuf::from("seeds/breeds.csv"));
        },
    );
}

#[test]
fn test_server_config_overrides() {
    support::with_scoped_env(
        &[
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("8081")),
            ("SEED_FILE", Some("/data/pets.csv")),
            ("REPOSITORY_CONFIG", Some("/etc/pets/repository.toml")),
        ],
        || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.bind_address(), "127.0.0.1:8081");
            assert_eq!(config.seed_file, PathBuf::from("/data/pets.csv"));
            assert_eq!(
                config.repository_config,
                Some(PathBuf::from("/etc/pets/repository.toml"))
            );
        },
    );
}

#[test]
fn test_server_config_keeps_host_name() {
    support::with_scoped_env(&[("HOST", Some("localhost")), ("PORT", Some("8082"))], || {
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "localhost:8082");
    });
}

#[test]
fn test_server_config_rejects_bad_port() {
    support::with_scoped_env(&[("PORT", Some("eighty"))], || {
        assert!(ServerConfig::from_env().is_err());
    });
}
