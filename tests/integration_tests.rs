use gender_novels::core::results::{analyze_raw_results, load_raw_results};
use gender_novels::core::{Dimension, Metric, TextSource};
use gender_novels::{
    AnalysisConfig, AnalysisEngine, Corpus, DistancePipeline, LocalResultStore, LocalTextSource,
    PronounDistance, RemoteTextSource,
};
use httpmock::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const SAMPLE_MANIFEST: &str = "author,date,title,country_publication,author_gender,filename,notes\n\
\"Austen, Jane\",1818,Persuasion,England,female,austen_persuasion.txt,\n\
\"Dickens, Charles\",1861,Great Expectations,England,male,dickens_great_expectations.txt,\n\
\"Eliot, George\",1871,Middlemarch,England,female,eliot_middlemarch.txt,\n\
\"Hawthorne, Nathaniel\",1850,The Scarlet Letter,United States,male,hawthorne_scarlet.txt,\n";

fn gutenberg(title: &str, body: &str) -> String {
    format!(
        "The Project Gutenberg EBook of {title}\r\n\r\n\
         *** START OF THIS PROJECT GUTENBERG EBOOK {title} ***\r\n\
         {body}\r\n\
         *** END OF THIS PROJECT GUTENBERG EBOOK {title} ***\r\n\
         End of license."
    )
}

fn sample_files() -> Vec<(&'static str, String)> {
    vec![
        ("corpora/sample_novels/sample_novels.csv", SAMPLE_MANIFEST.to_string()),
        (
            "corpora/sample_novels/texts/austen_persuasion.txt",
            gutenberg("PERSUASION", "She knew he would come; her heart told her so."),
        ),
        (
            "corpora/sample_novels/texts/dickens_great_expectations.txt",
            gutenberg("GREAT EXPECTATIONS", "He gave him his hand and he smiled at her."),
        ),
        (
            "corpora/sample_novels/texts/eliot_middlemarch.txt",
            gutenberg("MIDDLEMARCH", "Her sister saw her before she saw him."),
        ),
        (
            "corpora/sample_novels/texts/hawthorne_scarlet.txt",
            "No boilerplate here. She stood; he watched her and his hands shook.".to_string(),
        ),
    ]
}

fn write_sample_corpus(root: &Path) {
    for (path, content) in sample_files() {
        let full_path = root.join(path);
        std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        std::fs::write(full_path, content).unwrap();
    }
}

#[tokio::test]
async fn test_sample_novels_by_authors_from_local_files() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_corpus(temp_dir.path());
    let source: Arc<dyn TextSource> = Arc::new(LocalTextSource::new(temp_dir.path()));

    let corpus = Corpus::load("sample_novels", source).await.unwrap();
    assert_eq!(corpus.len(), 4);

    let texts = corpus.load_sample_novels_by_authors().await.unwrap();
    assert_eq!(
        texts.austen.trim(),
        "She knew he would come; her heart told her so."
    );
    assert_eq!(
        texts.dickens.trim(),
        "He gave him his hand and he smiled at her."
    );
    assert_eq!(texts.eliot.trim(), "Her sister saw her before she saw him.");
    assert!(texts.hawthorne.starts_with("No boilerplate here."));

    let notes = &corpus.novels()[0].metadata().notes;
    assert_eq!(*notes, None);
}

#[tokio::test]
async fn test_end_to_end_local_analysis() -> anyhow::Result<()> {
    let corpus_dir = TempDir::new()?;
    let output_dir = TempDir::new()?;
    write_sample_corpus(corpus_dir.path());

    let config = AnalysisConfig::from_toml_str(&format!(
        r#"
[corpus]
name = "sample_novels"

[source]
mode = "local"
base_path = "{}"

[output]
path = "{}"

[aggregation]
metrics = ["mean", "median"]
dimensions = ["author_gender", "date", "location"]
"#,
        corpus_dir.path().display().to_string().replace('\\', "/"),
        output_dir.path().display().to_string().replace('\\', "/"),
    ))?;

    let storage = LocalResultStore::new(config.output_path());
    let pipeline = DistancePipeline::new(storage, config, PronounDistance::new());
    let summary = AnalysisEngine::new(pipeline).run().await?;

    assert_eq!(summary.novels_loaded, 4);
    assert_eq!(summary.novels_analyzed, 4);
    assert!(summary.failures.is_empty());
    assert_eq!(summary.stored_keys.len(), 1 + 2 * 3);
    assert!(output_dir
        .path()
        .join("instance_distance_median_differences_by_location.json")
        .exists());

    let store = LocalResultStore::new(output_dir.path());
    let stored = load_raw_results(&store, "sample_novels").await?;
    let order: Vec<&str> = stored
        .results
        .iter()
        .map(|entry| entry.novel.title.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "Persuasion",
            "Great Expectations",
            "Middlemarch",
            "The Scarlet Letter"
        ]
    );

    let aggregates = analyze_raw_results(
        &store,
        "sample_novels",
        &[Metric::Mean],
        &[Dimension::AuthorGender],
    )
    .await?;
    let (_, _, bins) = &aggregates[0];
    assert_eq!(bins.get("male").unwrap().len(), 2);
    assert_eq!(bins.get("female").unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rerun_keeps_existing_raw_results() -> anyhow::Result<()> {
    let corpus_dir = TempDir::new()?;
    let output_dir = TempDir::new()?;
    write_sample_corpus(corpus_dir.path());

    let toml = format!(
        r#"
[corpus]
name = "sample_novels"

[source]
mode = "local"
base_path = "{}"

[output]
path = "{}"
"#,
        corpus_dir.path().display().to_string().replace('\\', "/"),
        output_dir.path().display().to_string().replace('\\', "/"),
    );

    for expected_raw_write in [true, false] {
        let config = AnalysisConfig::from_toml_str(&toml)?;
        let storage = LocalResultStore::new(config.output_path());
        let pipeline = DistancePipeline::new(storage, config, PronounDistance::new());
        let summary = AnalysisEngine::new(pipeline).run().await?;

        assert_eq!(
            summary
                .stored_keys
                .contains(&"instance_distance_raw_analysis_sample_novels".to_string()),
            expected_raw_write
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_remote_corpus_with_missing_text() {
    let server = MockServer::start();

    let manifest_mock = server.mock(|when, then| {
        when.method(GET).path("/corpora/remote/remote.csv");
        then.status(200).body(
            "author,date,title,filename,author_gender\n\
             A,1899,Present,present.txt,female\n\
             B,1900,Absent,absent.txt,male\n",
        );
    });
    let text_mock = server.mock(|when, then| {
        when.method(GET).path("/corpora/remote/texts/present.txt");
        then.status(200).body("she and he and she");
    });
    let missing_mock = server.mock(|when, then| {
        when.method(GET).path("/corpora/remote/texts/absent.txt");
        then.status(404);
    });

    let source: Arc<dyn TextSource> =
        Arc::new(RemoteTextSource::new(&server.base_url(), None).unwrap());
    let corpus = Corpus::load("remote", source).await.unwrap();
    manifest_mock.assert();

    let analyzer = gender_novels::DistanceAnalyzer::new(PronounDistance::new());
    let results = analyzer.analyze("remote", corpus.into_novels()).await;

    text_mock.assert();
    missing_mock.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results.failures.len(), 1);
    assert!(results.failures[0].message.contains("absent.txt"));

    let present = results.get("present.txt").unwrap();
    assert_eq!(present.category_b.mean, 4.0);
    assert_eq!(present.difference.mean, -4.0);
}

#[tokio::test]
async fn test_config_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("analysis.toml");
    std::fs::write(
        &config_path,
        r#"
[corpus]
name = "gutenberg"

[source]
mode = "remote"
base_url = "https://mirror.example.org/gender_novels"

[output]
path = "./results"
"#,
    )
    .unwrap();

    let config = AnalysisConfig::from_file(&config_path).unwrap();
    assert_eq!(config.corpus.name, "gutenberg");
    assert!(AnalysisConfig::from_file(temp_dir.path().join("missing.toml")).is_err());
}
