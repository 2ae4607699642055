//! Data models for registry lookups and export
//!
//! This module contains the structures representing a full BrasilAPI CNPJ
//! registry record and the flat row exported to the spreadsheet. Field
//! names follow the wire format of the registry service, so the structs
//! deserialize directly from the response body.

use serde::{Deserialize, Serialize};

// =============================================================================
// Registry Record (full response)
// =============================================================================

/// A secondary economic activity code attached to a company registration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SecondaryActivity {
    /// CNAE activity code
    pub codigo: i64,
    /// Human-readable activity description
    pub descricao: String,
}

/// A partner/shareholder entry in the company's ownership board (QSA)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Partner {
    /// Partner kind (1 = legal entity, 2 = natural person, 3 = foreign)
    pub identificador_de_socio: i64,

    /// Partner name
    pub nome_socio: String,

    /// Partner document (CPF or CNPJ, possibly masked)
    pub cnpj_cpf_do_socio: String,

    /// Partner qualification code
    pub codigo_qualificacao_socio: i64,

    /// Share of the company capital, when disclosed
    #[serde(default)]
    pub percentual_capital_social: Option<f64>,

    /// Date the partner joined the company
    pub data_entrada_sociedade: String,

    // Legal-representative sub-fields, null for partners acting directly
    #[serde(default)]
    pub cpf_representante_legal: Option<String>,
    #[serde(default)]
    pub nome_representante_legal: Option<String>,
    #[serde(default)]
    pub codigo_qualificacao_representante_legal: Option<i64>,
}

/// Full registration record for one company as returned by the registry
///
/// Scalar fields mirror the BrasilAPI CNPJ v1 response. Dates arrive as
/// ISO strings and are carried through unparsed; the export is a verbatim
/// copy, not an interpretation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistryRecord {
    /// Digits-only identifier the record was fetched for
    pub cnpj: String,

    /// Head office / branch indicator (1 = head office, 2 = branch)
    pub identificador_matriz_filial: i64,
    #[serde(default)]
    pub descricao_matriz_filial: Option<String>,

    /// Registered legal name
    pub razao_social: String,

    /// Trade name, empty when none is registered
    pub nome_fantasia: String,

    /// Registration status code and optional description
    pub situacao_cadastral: i64,
    #[serde(default)]
    pub descricao_situacao_cadastral: Option<String>,
    #[serde(default)]
    pub data_situacao_cadastral: Option<String>,
    pub motivo_situacao_cadastral: i64,

    /// City name for companies registered abroad
    #[serde(default)]
    pub nome_cidade_exterior: Option<String>,

    /// Legal nature code
    pub codigo_natureza_juridica: i64,

    /// Date the company started operating
    pub data_inicio_atividade: String,

    /// Primary economic activity code and description
    pub cnae_fiscal: i64,
    pub cnae_fiscal_descricao: String,

    // Address fields
    #[serde(default)]
    pub descricao_tipo_logradouro: Option<String>,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cep: String,
    pub uf: String,
    pub codigo_municipio: i64,
    pub municipio: String,

    // Contact numbers, secondary ones may be null
    pub ddd_telefone_1: String,
    #[serde(default)]
    pub ddd_telefone_2: Option<String>,
    #[serde(default)]
    pub ddd_fax: Option<String>,

    /// Qualification code of the person responsible for the company
    pub qualificacao_do_responsavel: i64,

    /// Declared company capital
    pub capital_social: f64,

    /// Size classification code and description
    pub porte: String,
    pub descricao_porte: String,

    // Simplified-tax-regime (Simples/MEI) flags and dates
    #[serde(default)]
    pub opcao_pelo_simples: Option<bool>,
    #[serde(default)]
    pub data_opcao_pelo_simples: Option<String>,
    #[serde(default)]
    pub data_exclusao_do_simples: Option<String>,
    #[serde(default)]
    pub opcao_pelo_mei: Option<bool>,

    // Special registration situation, rarely present
    #[serde(default)]
    pub situacao_especial: Option<String>,
    #[serde(default)]
    pub data_situacao_especial: Option<String>,

    /// Secondary activity codes, possibly empty
    pub cnaes_secundarios: Vec<SecondaryActivity>,

    /// Partner/shareholder board, possibly empty
    pub qsa: Vec<Partner>,
}

// =============================================================================
// Export Record (flat projection)
// =============================================================================

/// Flat spreadsheet row for one company
///
/// Contains every scalar field of [`RegistryRecord`] in declaration order;
/// the two nested collections are dropped. The CSV header row and the
/// workbook column order are both derived from this struct, so field order
/// here is the single source of truth for the export layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub cnpj: String,
    pub identificador_matriz_filial: i64,
    pub descricao_matriz_filial: Option<String>,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub situacao_cadastral: i64,
    pub descricao_situacao_cadastral: Option<String>,
    pub data_situacao_cadastral: Option<String>,
    pub motivo_situacao_cadastral: i64,
    pub nome_cidade_exterior: Option<String>,
    pub codigo_natureza_juridica: i64,
    pub data_inicio_atividade: String,
    pub cnae_fiscal: i64,
    pub cnae_fiscal_descricao: String,
    pub descricao_tipo_logradouro: Option<String>,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cep: String,
    pub uf: String,
    pub codigo_municipio: i64,
    pub municipio: String,
    pub ddd_telefone_1: String,
    pub ddd_telefone_2: Option<String>,
    pub ddd_fax: Option<String>,
    pub qualificacao_do_responsavel: i64,
    pub capital_social: f64,
    pub porte: String,
    pub descricao_porte: String,
    pub opcao_pelo_simples: Option<bool>,
    pub data_opcao_pelo_simples: Option<String>,
    pub data_exclusao_do_simples: Option<String>,
    pub opcao_pelo_mei: Option<bool>,
    pub situacao_especial: Option<String>,
    pub data_situacao_especial: Option<String>,
}

impl ExportRecord {
    /// Column headers in export order, matching the struct declaration
    pub const HEADERS: [&'static str; 36] = [
        "cnpj",
        "identificador_matriz_filial",
        "descricao_matriz_filial",
        "razao_social",
        "nome_fantasia",
        "situacao_cadastral",
        "descricao_situacao_cadastral",
        "data_situacao_cadastral",
        "motivo_situacao_cadastral",
        "nome_cidade_exterior",
        "codigo_natureza_juridica",
        "data_inicio_atividade",
        "cnae_fiscal",
        "cnae_fiscal_descricao",
        "descricao_tipo_logradouro",
        "logradouro",
        "numero",
        "complemento",
        "bairro",
        "cep",
        "uf",
        "codigo_municipio",
        "municipio",
        "ddd_telefone_1",
        "ddd_telefone_2",
        "ddd_fax",
        "qualificacao_do_responsavel",
        "capital_social",
        "porte",
        "descricao_porte",
        "opcao_pelo_simples",
        "data_opcao_pelo_simples",
        "data_exclusao_do_simples",
        "opcao_pelo_mei",
        "situacao_especial",
        "data_situacao_especial",
    ];
}
