// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SCORER DE CREDIBILIDADE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Função pura URL → (score, explicação), baseada em tabelas estáticas de
// sinais de domínio/path. Nunca falha: URLs inválidas degradam para um
// score de baixa confiança em vez de erro.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::types::{CredibilityLevel, CredibilityResult};

/// Score inicial antes de qualquer sinal.
const BASE_SCORE: f32 = 1.0;

/// Limites do score final.
const MIN_SCORE: f32 = 0.0;
const MAX_SCORE: f32 = 3.0;

// Tier 1: instituições acadêmicas e governamentais (+2.0)
const TIER1_DOMAINS: &[(&str, &str)] = &[
    (".edu", "Educational institution"),
    (".gov", "Government source"),
    ("arxiv.org", "Academic preprint repository"),
    ("pubmed.ncbi.nlm.nih.gov", "Medical literature database"),
    ("scholar.google", "Academic search engine"),
    ("ieee.org", "Professional engineering society"),
    ("acm.org", "Computing machinery association"),
    ("nature.com", "Premier science journal"),
    ("science.org", "AAAS Science journal"),
    ("cell.com", "Life sciences journal"),
    ("nejm.org", "Medical journal"),
    ("thelancet.com", "Medical journal"),
];

// Tier 2: publishers acadêmicos e bases de pesquisa (+1.5)
const TIER2_DOMAINS: &[(&str, &str)] = &[
    ("springer.com", "Academic publisher"),
    ("sciencedirect.com", "Scientific database"),
    ("jstor.org", "Academic archive"),
    ("plos.org", "Open access publisher"),
    ("wiley.com", "Academic publisher"),
    ("tandfonline.com", "Academic publisher"),
    ("cambridge.org", "University press"),
    ("oup.com", "Oxford University Press"),
    ("researchgate.net", "Academic network"),
    ("semanticscholar.org", "AI-powered research tool"),
    ("osti.gov", "Science and technology info"),
    ("nist.gov", "National Institute of Standards"),
];

// Tier 3: organizações reputadas (+0.8)
const TIER3_DOMAINS: &[(&str, &str)] = &[
    (".org", "Non-profit organization"),
    ("who.int", "World Health Organization"),
    ("nih.gov", "National Institutes of Health"),
    ("cdc.gov", "Centers for Disease Control"),
    ("nasa.gov", "NASA"),
    ("unesco.org", "UNESCO"),
    ("oecd.org", "OECD"),
    ("worldbank.org", "World Bank"),
    ("reuters.com", "News agency"),
    ("bbc.com", "Public broadcaster"),
    ("npr.org", "Public radio"),
];

// Indicadores de baixa credibilidade (-1.2)
const LOW_CREDIBILITY: &[(&str, &str)] = &[
    ("blog", "Personal blog"),
    ("wordpress", "Blog platform"),
    ("medium.com", "Publishing platform"),
    ("facebook.com", "Social media"),
    ("twitter.com", "Social media"),
    ("instagram.com", "Social media"),
    ("tiktok.com", "Social media"),
    ("reddit.com", "Forum"),
    ("quora.com", "Q&A platform"),
    ("yahoo.com", "Web portal"),
    ("answers.com", "Q&A site"),
];

// Termos de conteúdo acadêmico no path (+0.3)
const ACADEMIC_PATH_TERMS: &[&str] = &[
    "paper",
    "article",
    "research",
    "study",
    "journal",
    "publication",
    "doi",
    "abstract",
];

// Extensões de documento no fim do path (+0.2)
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

// Subdomínios institucionais (+0.2)
const ACADEMIC_SUBDOMAINS: &[&str] = &["research.", "library.", "academic.", "scholar."];

/// Retorna a descrição do primeiro marcador da tabela presente no domínio.
fn first_match(
    domain: &str,
    table: &'static [(&'static str, &'static str)],
) -> Option<&'static str> {
    table
        .iter()
        .find(|(marker, _)| domain.contains(marker))
        .map(|(_, description)| *description)
}

/// Avalia a credibilidade de uma URL.
///
/// Contrato: nunca falha. Entrada vazia recebe 0.0, URL que não parseia
/// recebe 0.5; todo o resto parte de um score base de 1.0 modificado por
/// sinais de domínio e path, clampado em [0.0, 3.0] e arredondado para
/// 1 casa decimal. A explicação lista cada sinal aplicado, na ordem de
/// avaliação, ou "Standard web source" quando nenhum casou.
pub fn score_url(url: &str) -> CredibilityResult {
    if url.trim().is_empty() {
        return CredibilityResult {
            score: 0.0,
            reason: "Invalid URL provided".to_string(),
            level: CredibilityLevel::Low,
        };
    }

    let lowered = url.to_lowercase();

    let parsed = match url::Url::parse(&lowered) {
        Ok(parsed) => parsed,
        Err(_) => {
            return CredibilityResult {
                score: 0.5,
                reason: "Unable to parse domain from URL".to_string(),
                level: CredibilityLevel::Low,
            };
        }
    };

    // Domínio sem prefixo www.; URLs sem host ficam com domínio vazio e só
    // recebem os bônus aditivos.
    let domain = parsed
        .host_str()
        .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string())
        .unwrap_or_default();
    let path = parsed.path().to_string();

    let mut score = BASE_SCORE;
    let mut reasons: Vec<String> = Vec::new();

    // No máximo um bônus de tier; tiers são mutuamente exclusivos e o mais
    // alto vence.
    if let Some(description) = first_match(&domain, TIER1_DOMAINS) {
        score += 2.0;
        reasons.push(format!("Tier 1: {}", description));
    } else if let Some(description) = first_match(&domain, TIER2_DOMAINS) {
        score += 1.5;
        reasons.push(format!("Tier 2: {}", description));
    } else if let Some(description) = first_match(&domain, TIER3_DOMAINS) {
        score += 0.8;
        reasons.push(format!("Tier 3: {}", description));
    }

    // Penalidade de baixa credibilidade, independente dos tiers: um blog em
    // .org, por exemplo, recebe o bônus tier 3 E a penalidade.
    if let Some(description) = first_match(&domain, LOW_CREDIBILITY) {
        score -= 1.2;
        reasons.push(format!("Low tier: {}", description));
    }

    // Bônus aditivos, cada um aplicado no máximo uma vez.
    if lowered.contains("https") {
        score += 0.1;
        reasons.push("Secure connection".to_string());
    }

    if ACADEMIC_PATH_TERMS.iter().any(|term| path.contains(term)) {
        score += 0.3;
        reasons.push("Academic content path".to_string());
    }

    if DOCUMENT_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        score += 0.2;
        reasons.push("Document format".to_string());
    }

    if lowered.contains("doi") || lowered.contains("dx.doi.org") {
        score += 0.4;
        reasons.push("DOI identifier present".to_string());
    }

    if ACADEMIC_SUBDOMAINS.iter().any(|sub| domain.contains(sub)) {
        score += 0.2;
        reasons.push("Academic subdomain".to_string());
    }

    let score = (score.clamp(MIN_SCORE, MAX_SCORE) * 10.0).round() / 10.0;
    let level = CredibilityLevel::from_score(score);

    let detail = if reasons.is_empty() {
        "Standard web source".to_string()
    } else {
        reasons.join(", ")
    };

    CredibilityResult {
        score,
        reason: format!(
            "{} {} credibility ({:.1}/3.0): {}",
            level.emoji(),
            level.as_str(),
            score,
            detail
        ),
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_scores_zero() {
        assert_eq!(score_url("").score, 0.0);
        assert_eq!(score_url("   ").score, 0.0);
        assert_eq!(score_url("").reason, "Invalid URL provided");
    }

    #[test]
    fn test_unparsable_url_fallback() {
        let result = score_url("not a url at all");
        assert_eq!(result.score, 0.5);
        assert_eq!(result.reason, "Unable to parse domain from URL");
    }

    #[test]
    fn test_tier1_domains_score_high() {
        for url in [
            "https://mit.edu/research/ai",
            "https://arxiv.org/abs/2023.12345",
            "https://www.nature.com/articles/ai-study",
            "https://cdc.gov/data",
        ] {
            let result = score_url(url);
            assert!(
                result.score >= 2.0,
                "expected high score for {}, got {}",
                url,
                result.score
            );
        }
    }

    #[test]
    fn test_low_credibility_domains_score_low() {
        for url in [
            "https://medium.com/ai-blog",
            "https://facebook.com/some-page",
            "https://reddit.com/r/science",
        ] {
            let result = score_url(url);
            assert!(
                result.score <= 1.5,
                "expected low score for {}, got {}",
                url,
                result.score
            );
        }
    }

    #[test]
    fn test_score_bounds_and_rounding() {
        let urls = [
            "https://arxiv.org/abs/1234.5678",
            "https://research.library.edu/paper/study.pdf",
            "http://blog.wordpress.com/post",
            "https://dx.doi.org/10.1000/xyz",
            "ftp://files.example.net/data",
            "mailto:someone@example.com",
            "https://example.com",
        ];
        for url in urls {
            let result = score_url(url);
            assert!((0.0..=3.0).contains(&result.score), "out of bounds: {}", url);
            // arredondado para 1 casa decimal
            let scaled = result.score * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-4, "not rounded: {}", url);
            assert!(!result.reason.is_empty());
        }
    }

    #[test]
    fn test_scorer_is_pure() {
        let url = "https://www.springer.com/journal/archive.pdf";
        let first = score_url(url);
        for _ in 0..10 {
            assert_eq!(score_url(url), first);
        }
    }

    #[test]
    fn test_single_tier_bonus_highest_wins() {
        // osti.gov casa tanto tier 1 (.gov) quanto tier 2 (osti.gov): só o
        // tier 1 deve aparecer.
        let result = score_url("http://osti.gov/report");
        assert!(result.reason.contains("Tier 1"));
        assert!(!result.reason.contains("Tier 2"));
    }

    #[test]
    fn test_org_blog_gets_bonus_and_penalty() {
        let result = score_url("http://myblog.org/post");
        assert!(result.reason.contains("Tier 3: Non-profit organization"));
        assert!(result.reason.contains("Low tier: Personal blog"));
    }

    #[test]
    fn test_document_format_requires_suffix() {
        let with_suffix = score_url("http://example.com/files/report.pdf");
        assert!(with_suffix.reason.contains("Document format"));

        let mid_path = score_url("http://example.com/report.pdf.html");
        assert!(!mid_path.reason.contains("Document format"));
    }

    #[test]
    fn test_additive_bonuses_stack() {
        // https (+0.1) + path acadêmico (+0.3) + doi (+0.4) sobre base 1.0
        let result = score_url("https://example.com/doi/10.1000/abstract");
        assert_eq!(result.score, 1.8);
        assert!(result.reason.contains("Secure connection"));
        assert!(result.reason.contains("Academic content path"));
        assert!(result.reason.contains("DOI identifier present"));
    }

    #[test]
    fn test_no_signal_is_standard_source() {
        let result = score_url("http://example.com/about");
        assert_eq!(result.score, 1.0);
        assert!(result.reason.contains("Standard web source"));
    }

    #[test]
    fn test_arxiv_outranks_medium() {
        let arxiv = score_url("https://arxiv.org/abs/1");
        let medium = score_url("https://medium.com/post");
        assert!(arxiv.score > medium.score);
        assert_eq!(arxiv.level, CredibilityLevel::High);
        assert_eq!(medium.level, CredibilityLevel::Low);
    }
}
