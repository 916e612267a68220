//! Configuração do wanted-status carregada a partir de `wanted.toml`.
//!
//! A struct [`WantedConfig`] contém o canal, o marcador de valor desconhecido
//! e os ids de template usados nas notificações, os slots em que a ação de
//! acusação fica oculta e a tabela de localização do host em memória.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `WANTED_STATUS_CONFIG` aponta para outro arquivo.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::action::Slot;
use crate::error::WantedError;

/// Nome do arquivo procurado no diretório atual.
pub const CONFIG_FILE: &str = "wanted.toml";

/// Variável de ambiente com o caminho de um arquivo de configuração alternativo.
pub const CONFIG_ENV: &str = "WANTED_STATUS_CONFIG";

/// Configuração de nível superior carregada de `wanted.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WantedConfig {
    /// Canal de rádio em que as notificações são transmitidas.
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Marcador usado em qualquer campo da notificação que não possa ser resolvido.
    #[serde(default = "default_unknown")]
    pub unknown: String,

    /// Id do template do motivo usado quando o acusador não informa nenhum.
    #[serde(default = "default_reason_template")]
    pub reason_template: String,

    /// Id do template do texto transmitido.
    #[serde(default = "default_message_template")]
    pub message_template: String,

    /// Slots de equipamento em que a ação de acusação não é oferecida.
    #[serde(default = "default_restricted_slots")]
    pub restricted_slots: Vec<Slot>,

    /// Tabela de localização: id do template para texto com marcadores `{ $arg }`.
    #[serde(default = "default_templates")]
    pub templates: HashMap<String, String>,
}

// Valor padrão para o canal: "Security".
fn default_channel() -> String {
    "Security".to_string()
}

// Valor padrão para campos não resolvidos: "Unknown".
fn default_unknown() -> String {
    "Unknown".to_string()
}

// Template padrão do motivo da acusação pelo visor.
fn default_reason_template() -> String {
    "criminal-records-reason-visor".to_string()
}

// Template padrão da mensagem enviada ao canal de segurança.
fn default_message_template() -> String {
    "criminal-records-console-wanted".to_string()
}

// Slots restritos por padrão: apenas o bolso.
fn default_restricted_slots() -> Vec<Slot> {
    vec![Slot::Pocket]
}

// Textos padrão dos dois templates acima.
fn default_templates() -> HashMap<String, String> {
    HashMap::from([
        (
            default_reason_template(),
            "Identified by a security visor".to_string(),
        ),
        (
            default_message_template(),
            "{ $officer } updated the wanted status of { $name } ({ $job }) with reason: { $reason }"
                .to_string(),
        ),
    ])
}

impl Default for WantedConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            unknown: default_unknown(),
            reason_template: default_reason_template(),
            message_template: default_message_template(),
            restricted_slots: default_restricted_slots(),
            templates: default_templates(),
        }
    }
}

impl WantedConfig {
    /// Carrega o arquivo indicado por `WANTED_STATUS_CONFIG`, que precisa existir.
    /// Sem a variável, carrega `wanted.toml` do diretório atual e usa os
    /// valores padrão se ele não existir.
    pub fn load() -> Result<Self, WantedError> {
        match std::env::var(CONFIG_ENV) {
            Ok(p) if !p.is_empty() => Self::load_from(Path::new(&p)),
            _ => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Carrega a configuração de um caminho explícito. Um arquivo ausente é erro.
    pub fn load_from(path: &Path) -> Result<Self, WantedError> {
        if !path.exists() {
            return Err(WantedError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config = toml::from_str::<WantedConfig>(&contents)?;
        validate_channel(&config.channel)?;

        // Uma tabela [templates] parcial só sobrescreve as chaves que define.
        for (id, text) in default_templates() {
            config.templates.entry(id).or_insert(text);
        }

        Ok(config)
    }

    /// Troca o canal de transmissão, com a mesma validação do arquivo.
    pub fn set_channel(&mut self, channel: impl Into<String>) -> Result<(), WantedError> {
        let channel = channel.into();
        validate_channel(&channel)?;
        self.channel = channel;
        Ok(())
    }
}

fn validate_channel(channel: &str) -> Result<(), WantedError> {
    if channel.trim().is_empty() {
        return Err(WantedError::Config("channel must not be empty".into()));
    }
    Ok(())
}
