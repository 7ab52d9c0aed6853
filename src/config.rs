// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO CHECKER E DO LLM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Configurações do pipeline e do summarizer.
// Todas as configurações podem ser definidas via .env
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Configuração do pipeline de avaliação de fontes.
///
/// Os defaults espelham o comportamento de referência do sistema:
/// até 7 candidatos, 4 workers concorrentes, 500ms de delay de cortesia
/// antes de cada fetch e excerpt de 1500 caracteres para sumarização.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Máximo de candidatos processados por query.
    pub max_sources: usize,

    /// Tamanho do pool de workers concorrentes.
    pub max_workers: usize,

    /// Delay de cortesia antes de cada fetch, em milissegundos.
    /// Por unidade de trabalho, não global.
    pub fetch_delay_ms: u64,

    /// Tamanho máximo do excerpt enviado ao summarizer, em caracteres.
    pub excerpt_max_chars: usize,

    /// Tamanho máximo do conteúdo retido por fetch, em caracteres.
    pub content_max_chars: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_sources: 7,
            max_workers: 4,
            fetch_delay_ms: 500,
            excerpt_max_chars: 1500,
            content_max_chars: 3000,
        }
    }
}

impl CheckerConfig {
    /// Cria configuração padrão.
    pub fn new() -> Self {
        Self::default()
    }

    /// Número efetivo de workers: min(configurado, núcleos de CPU).
    pub fn effective_workers(&self) -> usize {
        std::cmp::min(self.max_workers.max(1), num_cpus::get().max(1))
    }
}

/// Carrega a configuração do checker a partir das variáveis de ambiente.
///
/// Variáveis suportadas:
/// - `CHECKER_MAX_SOURCES`: máximo de candidatos por query (padrão: 7)
/// - `CHECKER_WORKERS`: workers concorrentes (padrão: 4)
/// - `CHECKER_FETCH_DELAY_MS`: delay de cortesia por fetch (padrão: 500)
/// - `CHECKER_EXCERPT_CHARS`: tamanho do excerpt para sumarização (padrão: 1500)
pub fn load_checker_config() -> CheckerConfig {
    let mut config = CheckerConfig::default();

    if let Some(max_sources) = env_usize("CHECKER_MAX_SOURCES") {
        if max_sources > 0 {
            config.max_sources = max_sources;
            log::info!("📦 CHECKER_MAX_SOURCES={}", max_sources);
        }
    }

    if let Some(workers) = env_usize("CHECKER_WORKERS") {
        if workers > 0 {
            config.max_workers = workers;
            log::info!("📦 CHECKER_WORKERS={}", workers);
        }
    }

    if let Ok(delay_str) = std::env::var("CHECKER_FETCH_DELAY_MS") {
        if let Ok(delay) = delay_str.parse::<u64>() {
            config.fetch_delay_ms = delay;
            log::info!("📦 CHECKER_FETCH_DELAY_MS={}", delay);
        }
    }

    if let Some(chars) = env_usize("CHECKER_EXCERPT_CHARS") {
        if chars > 0 {
            config.excerpt_max_chars = chars;
            log::info!("📦 CHECKER_EXCERPT_CHARS={}", chars);
        }
    }

    config
}

/// Configuração do LLM usado pelo summarizer.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chave da API OpenAI.
    pub api_key: String,

    /// Modelo de chat (padrão: "gpt-4o").
    pub model: String,

    /// URL base da API.
    pub base_url: String,

    /// Máximo de tokens da resposta.
    pub max_tokens: u32,

    /// Temperatura da geração.
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 200,
            temperature: 0.3,
        }
    }
}

impl LlmConfig {
    /// Cria configuração com a chave fornecida e demais campos padrão.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// Carrega a configuração do LLM a partir das variáveis de ambiente.
///
/// Variáveis suportadas:
/// - `OPENAI_API_KEY`: chave da API (obrigatória para o summarizer real)
/// - `LLM_MODEL`: modelo de chat (padrão: "gpt-4o")
/// - `LLM_API_BASE_URL`: URL base customizada (opcional)
/// - `LLM_MAX_TOKENS`: máximo de tokens do resumo (padrão: 200)
/// - `LLM_TEMPERATURE`: temperatura (padrão: 0.3)
pub fn load_llm_config() -> LlmConfig {
    let mut config = LlmConfig::default();

    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        config.api_key = api_key;
    }

    if let Ok(model) = std::env::var("LLM_MODEL") {
        if !model.trim().is_empty() {
            log::info!("📦 LLM_MODEL={}", model);
            config.model = model;
        }
    }

    if let Ok(base_url) = std::env::var("LLM_API_BASE_URL") {
        if !base_url.trim().is_empty() {
            log::info!("📦 LLM_API_BASE_URL={}", base_url);
            config.base_url = base_url;
        }
    }

    if let Ok(max_tokens_str) = std::env::var("LLM_MAX_TOKENS") {
        if let Ok(max_tokens) = max_tokens_str.parse::<u32>() {
            if max_tokens > 0 {
                config.max_tokens = max_tokens;
                log::info!("📦 LLM_MAX_TOKENS={}", max_tokens);
            }
        }
    }

    if let Ok(temperature_str) = std::env::var("LLM_TEMPERATURE") {
        if let Ok(temperature) = temperature_str.parse::<f32>() {
            if (0.0..=2.0).contains(&temperature) {
                config.temperature = temperature;
                log::info!("📦 LLM_TEMPERATURE={}", temperature);
            }
        }
    }

    config
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok()?.parse::<usize>().ok()
}
