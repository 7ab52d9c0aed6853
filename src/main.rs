// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CRED CHECKER CLI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// CLI para avaliação de credibilidade de fontes acadêmicas.
//
// Uso:
//   cred-checker-cli "impact of AI on education"
//   cred-checker-cli --score https://arxiv.org/abs/1234   (só o scorer)
//   cred-checker-cli --json "query"                       (saída JSON)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use cred_checker::fetcher::HttpFetcher;
use cred_checker::prelude::*;
use cred_checker::search::DuckDuckGoClient;
use cred_checker::summarizer::OpenAiSummarizer;
use std::path::PathBuf;
use std::sync::Arc;

/// Tenta carregar o arquivo .env de múltiplos locais possíveis
fn load_dotenv() {
    // Lista de possíveis locais para o .env
    let possible_paths = [
        // Diretório atual
        PathBuf::from(".env"),
        // Diretório pai
        PathBuf::from("../.env"),
        // Caminho absoluto em tempo de compilação (fallback)
        {
            let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            p.push(".env");
            p
        },
    ];

    for path in &possible_paths {
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => {
                    eprintln!(
                        "✓ Carregado .env de: {:?}",
                        path.canonicalize().unwrap_or(path.clone())
                    );
                    return;
                }
                Err(e) => {
                    eprintln!("⚠ Erro ao carregar {:?}: {}", path, e);
                }
            }
        }
    }

    // Última tentativa: dotenvy padrão
    if dotenvy::dotenv().is_ok() {
        eprintln!("✓ Carregado .env do diretório atual");
    } else {
        eprintln!("⚠ Nenhum arquivo .env encontrado. Certifique-se de que OPENAI_API_KEY está definida.");
    }
}

fn print_usage(program: &str) {
    eprintln!("Cred Checker CLI v{}", cred_checker::VERSION);
    eprintln!();
    eprintln!("Uso: {} <query>", program);
    eprintln!();
    eprintln!("Opções:");
    eprintln!("  --score <url>   Avalia a credibilidade de uma única URL (sem rede)");
    eprintln!("  --json          Imprime o resultado completo como JSON");
    eprintln!();
    eprintln!("Exemplos:");
    eprintln!("  {} \"impact of AI on education\"", program);
    eprintln!("  {} --score https://arxiv.org/abs/2023.12345", program);
    eprintln!("  {} --json \"machine learning algorithms\"", program);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carregar .env PRIMEIRO, antes de qualquer coisa
    load_dotenv();

    // Inicializar logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse argumentos
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    // Modo scorer direto: não precisa de rede nem de API key
    if args.len() >= 3 && args[1] == "--score" {
        for url in &args[2..] {
            let result = score_url(url);
            println!("{}", url);
            println!("  {}", result.reason);
        }
        return Ok(());
    }

    let (as_json, query) = if args[1] == "--json" {
        (true, args[2..].join(" "))
    } else {
        (false, args[1..].join(" "))
    };

    if query.trim().is_empty() {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        eprintln!("✗ Erro: OPENAI_API_KEY não encontrada!");
        eprintln!();
        eprintln!("Certifique-se de que:");
        eprintln!("  1. O arquivo .env existe no diretório do projeto");
        eprintln!("  2. O arquivo contém: OPENAI_API_KEY=sua-chave-aqui");
        eprintln!();
        eprintln!("Ou defina a variável de ambiente diretamente:");
        eprintln!("  export OPENAI_API_KEY=sua-chave-aqui");
        std::process::exit(1);
    });

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(" CRED CHECKER v{}", cred_checker::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("Query: {}", query);
    println!();

    let mut llm_config = load_llm_config();
    llm_config.api_key = api_key;

    let checker = CredibilityChecker::new(
        Arc::new(DuckDuckGoClient::new()),
        Arc::new(HttpFetcher::new()),
        Arc::new(OpenAiSummarizer::new(llm_config)),
    )
    .with_config(load_checker_config())
    .with_sink(Arc::new(LogSink));

    let result = checker.process_query(&query).await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.success {
        eprintln!(
            "✗ Falha ao processar query: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    if result.sources.is_empty() {
        println!("Nenhuma fonte encontrada para esta query.");
        return Ok(());
    }

    println!("Fontes ranqueadas por credibilidade:");
    println!();

    for source in &result.sources {
        println!(
            "#{} [{:.1}/3.0] {}",
            source.rank, source.credibility_score, source.title
        );
        println!("    {}", source.url);
        println!("    {}", source.credibility_reason);
        println!("    {}", source.summary);
        if !source.content_available {
            println!("    (conteúdo indisponível; resumo baseado em metadados)");
        }
        println!();
    }

    Ok(())
}
