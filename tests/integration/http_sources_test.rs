// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use jobscout::domain::models::job_posting::JobSource;
use jobscout::domain::models::job_query::SourceQuery;
use jobscout::domain::services::normalizer::Normalizer;
use jobscout::domain::sources::adapter::{JobSourceAdapter, RawRecord, SourceError};
use jobscout::infrastructure::jobs::adzuna::AdzunaAdapter;
use jobscout::infrastructure::jobs::indeed::IndeedAdapter;
use jobscout::infrastructure::jobs::linkedin::LinkedInAdapter;
use jobscout::infrastructure::jobs::naukri::NaukriAdapter;
use jobscout::infrastructure::jobs::rapidapi::RapidApiAdapter;
use jobscout::infrastructure::jobs::remoteok::RemoteOkAdapter;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LINKEDIN_PAGE: &str = r#"
<html><body><ul class="jobs-search__results-list">
  <li><div class="base-card job-search-card">
    <a class="base-card__full-link" href="https://in.linkedin.com/jobs/view/data-scientist-1"></a>
    <h3 class="base-search-card__title">Data Scientist</h3>
    <h4 class="base-search-card__subtitle">TechCorp</h4>
    <span class="job-search-card__location">Bengaluru</span>
    <span class="job-search-card__salary-info">₹20,00,000/yr</span>
    <time datetime="2024-04-02">1 week ago</time>
  </div></li>
  <li><div class="base-card job-search-card">
    <h3 class="base-search-card__title">   </h3>
    <h4 class="base-search-card__subtitle">Broken Card Inc</h4>
  </div></li>
  <li><div class="base-card job-search-card">
    <a class="base-card__full-link" href="/jobs/view/ml-2"></a>
    <h3 class="base-search-card__title">ML Engineer</h3>
    <h4 class="base-search-card__subtitle">AI Labs</h4>
  </div></li>
</ul></body></html>
"#;

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn test_linkedin_scrape_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/search/"))
        .and(query_param("keywords", "Data Scientist"))
        .and(query_param("location", "India"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LINKEDIN_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = LinkedInAdapter::new(client()).with_base_url(server.uri());
    let records = adapter
        .fetch(&SourceQuery::new("Data Scientist", "India", 5))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);

    let normalizer = Normalizer::default();
    let jobs = normalizer.normalize_all(&records, JobSource::LinkedIn, "India");
    assert_eq!(jobs[0].title(), "Data Scientist");
    assert_eq!(jobs[0].salary(), "₹20,00,000/yr");
    assert_eq!(jobs[0].posted_date(), "2024-04-02");
    assert_eq!(jobs[1].title(), "N/A");
    assert_eq!(jobs[1].company(), "Broken Card Inc");
    assert_eq!(jobs[1].apply_link(), "#");
    assert_eq!(jobs[2].location(), "India");
    assert_eq!(jobs[2].salary(), "Not specified");
    assert_eq!(jobs[2].description(), "No description available");
    assert_eq!(
        jobs[2].apply_link(),
        format!("{}/jobs/view/ml-2", server.uri())
    );
}

#[tokio::test]
async fn test_indeed_http_error_is_a_source_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = IndeedAdapter::new(client()).with_base_url(server.uri());
    let result = adapter
        .fetch(&SourceQuery::new("Python Developer", "India", 3))
        .await;

    assert_eq!(result, Err(SourceError::HttpStatus(500)));
}

#[tokio::test]
async fn test_indeed_captcha_page_is_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><form id=\"captcha-form\">Please verify you are human</form></body></html>",
        ))
        .mount(&server)
        .await;

    let adapter = IndeedAdapter::new(client()).with_base_url(server.uri());
    let result = adapter
        .fetch(&SourceQuery::new("Python Developer", "India", 3))
        .await;

    assert_eq!(result, Err(SourceError::Blocked));
}

#[tokio::test]
async fn test_naukri_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data-scientist-jobs-in-india"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let adapter = NaukriAdapter::new(client())
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let result = adapter
        .fetch(&SourceQuery::new("Data Scientist", "India", 3))
        .await;

    assert_eq!(result, Err(SourceError::Timeout));
}

#[tokio::test]
async fn test_rapidapi_sends_credentials_and_maps_salary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("X-RapidAPI-Key", "secret-key"))
        .and(header("X-RapidAPI-Host", "jsearch.p.rapidapi.com"))
        .and(query_param("query", "Data Scientist in India"))
        .and(query_param("num_pages", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "data": [
                {
                    "job_title": "Data Scientist",
                    "employer_name": "Globex",
                    "job_city": "Pune",
                    "job_min_salary": 120000,
                    "job_max_salary": 150000,
                    "job_description": "<p>Build &amp; ship models</p>",
                    "job_apply_link": "https://globex.example/apply/7",
                    "job_posted_at_datetime_utc": "2024-03-01T08:30:00.000Z",
                    "job_employment_type": "FULLTIME"
                },
                {"job_title": "Data Analyst", "employer_name": "Initech"},
                {"job_title": "Over quota", "employer_name": "Nobody"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = RapidApiAdapter::new(client(), Some("secret-key")).with_base_url(server.uri());
    let records = adapter
        .fetch(&SourceQuery::new("Data Scientist", "India", 2))
        .await
        .unwrap();
    assert_eq!(records.len(), 2);

    let jobs = Normalizer::default().normalize_all(&records, JobSource::RapidApi, "India");
    assert_eq!(jobs[0].salary(), "$120,000-$150,000");
    assert_eq!(jobs[0].description(), "Build & ship models");
    assert_eq!(jobs[0].posted_date(), "2024-03-01");
    assert_eq!(jobs[0].employment_type(), "FULLTIME");
    assert_eq!(jobs[1].location(), "India");
    assert_eq!(jobs[1].apply_link(), "#");
}

#[tokio::test]
async fn test_rapidapi_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let adapter = RapidApiAdapter::new(client(), None).with_base_url(server.uri());
    assert!(!adapter.is_enabled());
    let records = adapter
        .fetch(&SourceQuery::new("Data Scientist", "India", 2))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_adzuna_query_and_nested_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/jobs/in/search/1"))
        .and(query_param("app_id", "my-id"))
        .and(query_param("app_key", "my-key"))
        .and(query_param("results_per_page", "3"))
        .and(query_param("what", "Web Developer"))
        .and(query_param("where", "India"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{
                "title": "Web Developer",
                "company": {"display_name": "WebCraft"},
                "location": {"display_name": "Chennai, Tamil Nadu"},
                "salary_min": 800000,
                "salary_max": 1500000,
                "description": "React and CSS",
                "redirect_url": "https://www.adzuna.in/details/1",
                "created": "2024-02-10T09:00:00Z",
                "contract_type": "permanent"
            }]
        })))
        .mount(&server)
        .await;

    let adapter =
        AdzunaAdapter::new(client(), Some(("my-id", "my-key"))).with_base_url(server.uri());
    let records = adapter
        .fetch(&SourceQuery::new("Web Developer", "India", 3))
        .await
        .unwrap();

    let jobs = Normalizer::default().normalize_all(&records, JobSource::Adzuna, "India");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company(), "WebCraft");
    assert_eq!(jobs[0].location(), "Chennai, Tamil Nadu");
    assert_eq!(jobs[0].salary(), "₹800,000-₹1,500,000");
    assert_eq!(jobs[0].employment_type(), "permanent");
    assert_eq!(jobs[0].source(), JobSource::Adzuna);
}

#[tokio::test]
async fn test_adzuna_malformed_payload_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let adapter = AdzunaAdapter::new(client(), Some(("id", "key"))).with_base_url(server.uri());
    let result = adapter
        .fetch(&SourceQuery::new("Web Developer", "India", 3))
        .await;

    assert!(matches!(result, Err(SourceError::ParseError(_))));
}

#[tokio::test]
async fn test_remoteok_filters_feed_by_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"legal": "By using the API you agree to the terms"},
            {"position": "Senior Python Developer", "company": "Snake Co", "url": "https://remoteok.com/l/1", "salary_min": 90000},
            {"position": "Illustrator", "company": "Ink"},
            {"position": "Python Data Engineer", "company": "Pipes", "location": ""}
        ])))
        .mount(&server)
        .await;

    let adapter = RemoteOkAdapter::new(client()).with_base_url(server.uri());
    let records = adapter
        .fetch(&SourceQuery::new("Python Developer", "India", 5))
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(matches!(records[0], RawRecord::Json(_)));

    let jobs = Normalizer::default().normalize_all(&records, JobSource::RemoteOk, "India");
    assert_eq!(jobs[0].title(), "Senior Python Developer");
    assert_eq!(jobs[0].salary(), "$90,000+");
    assert_eq!(jobs[1].location(), "Remote");
}
