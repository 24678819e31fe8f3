//! cURL export scenarios.
//!
//! Exported commands must describe the same request the assembler builds,
//! minus the credentials.

use super::{environment, init_test_env};
use rest_workbench::assembler::assemble;
use rest_workbench::curl::{export, export_compact};
use rest_workbench::models::{
    ApiKeyLocation, AuthConfig, HttpMethod, RawContentType, RequestBody, RequestTemplate,
    SecretRef, Variable,
};
use rest_workbench::variables::public_variables;

#[test]
fn test_export_url_matches_assembled_url() {
    init_test_env();
    let env = environment("dev", &[("baseUrl", "https://api.example.com"), ("term", "a&b")]);
    let template = RequestTemplate::new("Search", HttpMethod::GET, "{{baseUrl}}/search?x=1")
        .with_query_param("q", "{{term}}")
        .with_query_param("", "ignored");

    let assembled = assemble(&template, &public_variables(&env.variables)).unwrap();
    let curl = export_compact(&template, Some(&env)).unwrap();

    assert_eq!(assembled.url, "https://api.example.com/search?x=1?q=a%26b");
    assert_eq!(curl, format!("curl '{}'", assembled.url));
}

#[test]
fn test_export_never_contains_credentials() {
    init_test_env();
    let mut env = environment("prod", &[("baseUrl", "https://api.example.com")]);
    env.variables
        .push(Variable::secret("token", SecretRef::new("prod-token")));
    env.variables.push(Variable::new("user", "admin"));
    env.variables.push(Variable::new("pass", "hunter2"));

    let auths = [
        AuthConfig::Bearer {
            token: "plain-bearer".to_string(),
        },
        AuthConfig::Basic {
            username: "{{user}}".to_string(),
            password: "{{pass}}".to_string(),
        },
        AuthConfig::ApiKey {
            key: "api_key".to_string(),
            value: "plain-key".to_string(),
            location: ApiKeyLocation::Query,
        },
    ];

    for auth in auths {
        let template = RequestTemplate::new("Secure", HttpMethod::GET, "{{baseUrl}}/secure")
            .with_auth(auth);
        let curl = export(&template, Some(&env)).unwrap();

        for secret in ["plain-bearer", "hunter2", "plain-key"] {
            assert!(!curl.contains(secret), "{} leaked into {}", secret, curl);
        }
    }
}

#[test]
fn test_multiline_layout() {
    init_test_env();
    let template = RequestTemplate::new("Create", HttpMethod::POST, "https://api.example.com/items")
        .with_header("Accept", "application/json")
        .with_body(RequestBody::Raw {
            content: "{}".to_string(),
            content_type: RawContentType::Json,
        });

    let curl = export(&template, None).unwrap();
    let lines: Vec<&str> = curl.lines().collect();
    assert_eq!(
        lines,
        vec![
            "curl \\",
            "  -X POST \\",
            "  'https://api.example.com/items' \\",
            "  -H 'Accept: application/json' \\",
            "  -H 'Content-Type: application/json' \\",
            "  -d '{}'",
        ]
    );
}
