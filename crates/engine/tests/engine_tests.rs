mod common;

use pageseal_engine::{
    ContentObservation, DeliveryMethod, Engine, TrustDecision,
};

use common::{doc_with_declarations, record, MockVerifier};

const URL: &str = "https://example.com/page";

fn observation(content: &str, method: DeliveryMethod) -> ContentObservation {
    ContentObservation {
        raw_content: content.to_string(),
        legacy_signature: None,
        url: URL.to_string(),
        tab_id: 7,
        method,
    }
}

#[tokio::test]
async fn unmatched_url_is_not_applicable_regardless_of_content() {
    let engine = Engine::with_records(
        MockVerifier::accepting("SIG"),
        &[record("https://other.example.net/*", "KEY")],
    );

    let doc = doc_with_declarations(&["type=pgp,version=1.0.0,signature=SIG"]);
    let decision = engine
        .observe_content(observation(&doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::NotApplicable);
}

#[tokio::test]
async fn end_to_end_valid_single_pgp_declaration() {
    // SIG is "valid" over the content with SIG removed.
    let doc = "<html><head><meta name=\"signature\" content=\"type=pgp,version=1.0.0,signature=SIG,allowedmethods=outsidehtml\"></head><body>hi</body></html>";
    let stripped = doc.replacen("SIG", "", 1);

    let engine = Engine::new(MockVerifier::expecting("SIG", stripped));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(observation(doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::Valid);
}

#[tokio::test]
async fn altered_content_is_invalid() {
    let doc = "<html><head><meta name=\"signature\" content=\"type=pgp,version=1.0.0,signature=SIG,allowedmethods=outsidehtml\"></head><body>hi</body></html>";
    let stripped = doc.replacen("SIG", "", 1);
    let engine = Engine::new(MockVerifier::expecting("SIG", stripped));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let tampered = doc.replace("hi", "hI");
    let decision = engine
        .observe_content(observation(&tampered, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::Invalid);
}

#[tokio::test]
async fn matched_url_without_declarations_is_invalid() {
    let engine = Engine::new(MockVerifier::accepting("SIG"));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(observation(
            "<html><head></head><body>hi</body></html>",
            DeliveryMethod::OutsideHtml,
        ))
        .await;
    assert_eq!(decision, TrustDecision::Invalid);
}

#[tokio::test]
async fn method_filtering_with_ordered_fallback() {
    let doc = doc_with_declarations(&[
        "type=pgp,version=1.0.0,signature=ONE,allowedmethods=filteredrequestdata",
        "type=pgp,version=1.0.0,signature=TWO,allowedmethods=outsidehtml",
    ]);

    let engine = Engine::new(MockVerifier::accepting("TWO"));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(observation(&doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::Valid);
}

#[tokio::test]
async fn legacy_comment_signature_is_synthesized_when_no_declarations_exist() {
    let sig = "-----BEGIN PGP SIGNATURE-----\n\nabc\n-----END PGP SIGNATURE-----";
    let doc = format!("<html><head></head><body>hi</body></html><!--! {sig} -->");

    // The synthesized declaration is pgpMinimized: the mock must see the
    // normalized form of the stripped document.
    let stripped = doc.replacen(sig, "", 1);
    let normalized = pageseal_engine::normalize::normalize("1.0.0", &stripped).unwrap();

    let engine = Engine::new(MockVerifier::expecting(sig, normalized));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(observation(&doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::Valid);
}

#[tokio::test]
async fn pre_extracted_legacy_signature_is_used() {
    let sig = "-----BEGIN PGP SIGNATURE-----\n\nabc\n-----END PGP SIGNATURE-----";
    let doc = "<html><head></head><body>hi</body></html>";
    let normalized = pageseal_engine::normalize::normalize("1.0.0", doc).unwrap();

    let engine = Engine::new(MockVerifier::expecting(sig, normalized));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(ContentObservation {
            raw_content: doc.to_string(),
            legacy_signature: Some(sig.to_string()),
            url: URL.to_string(),
            tab_id: 7,
            method: DeliveryMethod::OutsideHtml,
        })
        .await;
    assert_eq!(decision, TrustDecision::Valid);
}

#[tokio::test]
async fn current_declarations_shadow_the_legacy_path() {
    // A document carrying both schemes uses the meta declarations only.
    let sig = "-----BEGIN PGP SIGNATURE-----\n\nabc\n-----END PGP SIGNATURE-----";
    let doc = format!(
        "<html><head><meta name=\"signature\" content=\"type=pgp,version=1.0.0,signature=META,allowedmethods=outsidehtml\"></head>\
         <body>hi</body></html><!--! {sig} -->"
    );

    // Verifier accepts only the legacy signature; with meta declarations
    // present the legacy one must never be tried.
    let engine = Engine::new(MockVerifier::accepting(sig));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(observation(&doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::Invalid);
}

#[tokio::test]
async fn replay_returns_cached_decision() {
    let doc = doc_with_declarations(&["type=pgp,version=1.0.0,signature=SIG,allowedmethods=outsidehtml"]);
    let engine = Engine::new(MockVerifier::accepting("SIG"));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let decision = engine
        .observe_content(observation(&doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(decision, TrustDecision::Valid);
    assert_eq!(engine.replay(URL), TrustDecision::Valid);
}

#[tokio::test]
async fn replay_without_cache_entry_for_trusted_url_is_unsure() {
    let engine = Engine::new(MockVerifier::accepting("SIG"));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    assert_eq!(engine.replay(URL), TrustDecision::Unsure);
}

#[tokio::test]
async fn replay_for_untrusted_url_is_not_applicable() {
    let engine = Engine::new(MockVerifier::accepting("SIG"));
    assert_eq!(engine.replay(URL), TrustDecision::NotApplicable);
}

#[tokio::test]
async fn fresh_decision_overwrites_the_cache() {
    let doc = doc_with_declarations(&["type=pgp,version=1.0.0,signature=SIG,allowedmethods=outsidehtml"]);
    let engine = Engine::new(MockVerifier::accepting("SIG"));
    engine.update_trust_config(&[record("https://example.com/*", "KEY")]);

    let first = engine
        .observe_content(observation(&doc, DeliveryMethod::OutsideHtml))
        .await;
    assert_eq!(first, TrustDecision::Valid);

    let second = engine
        .observe_content(observation(
            "<html><head></head><body>hi</body></html>",
            DeliveryMethod::OutsideHtml,
        ))
        .await;
    assert_eq!(second, TrustDecision::Invalid);
    assert_eq!(engine.replay(URL), TrustDecision::Invalid);
}

#[test]
fn decision_data_for_the_indicator() {
    assert_eq!(TrustDecision::Valid.data().icon, "images/sigGood.png");
    assert!(!TrustDecision::Valid.data().disable);
    assert_eq!(TrustDecision::Invalid.data().title, "Bad or Missing Signature!");
    assert!(TrustDecision::NotApplicable.data().disable);
    assert_eq!(TrustDecision::Unsure.data().title, "Inconsistent state.");
}

#[test]
fn delivery_method_names_are_parsed_case_insensitively() {
    assert_eq!(
        DeliveryMethod::parse("filterResponseData"),
        Some(DeliveryMethod::FilterResponseData)
    );
    assert_eq!(
        DeliveryMethod::parse("outsideHTML"),
        Some(DeliveryMethod::OutsideHtml)
    );
    assert_eq!(DeliveryMethod::parse("carrierPigeon"), None);
}
