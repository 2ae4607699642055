//! Projection of full registry records onto flat export rows
//!
//! Pure field-by-field copy. The two nested collections (secondary
//! activities and the partner board) have no representation in the
//! spreadsheet and are dropped here.

use crate::app::models::{ExportRecord, RegistryRecord};

/// Project a validated registry record onto its export row
pub fn project(record: &RegistryRecord) -> ExportRecord {
    ExportRecord {
        cnpj: record.cnpj.clone(),
        identificador_matriz_filial: record.identificador_matriz_filial,
        descricao_matriz_filial: record.descricao_matriz_filial.clone(),
        razao_social: record.razao_social.clone(),
        nome_fantasia: record.nome_fantasia.clone(),
        situacao_cadastral: record.situacao_cadastral,
        descricao_situacao_cadastral: record.descricao_situacao_cadastral.clone(),
        data_situacao_cadastral: record.data_situacao_cadastral.clone(),
        motivo_situacao_cadastral: record.motivo_situacao_cadastral,
        nome_cidade_exterior: record.nome_cidade_exterior.clone(),
        codigo_natureza_juridica: record.codigo_natureza_juridica,
        data_inicio_atividade: record.data_inicio_atividade.clone(),
        cnae_fiscal: record.cnae_fiscal,
        cnae_fiscal_descricao: record.cnae_fiscal_descricao.clone(),
        descricao_tipo_logradouro: record.descricao_tipo_logradouro.clone(),
        logradouro: record.logradouro.clone(),
        numero: record.numero.clone(),
        complemento: record.complemento.clone(),
        bairro: record.bairro.clone(),
        cep: record.cep.clone(),
        uf: record.uf.clone(),
        codigo_municipio: record.codigo_municipio,
        municipio: record.municipio.clone(),
        ddd_telefone_1: record.ddd_telefone_1.clone(),
        ddd_telefone_2: record.ddd_telefone_2.clone(),
        ddd_fax: record.ddd_fax.clone(),
        qualificacao_do_responsavel: record.qualificacao_do_responsavel,
        capital_social: record.capital_social,
        porte: record.porte.clone(),
        descricao_porte: record.descricao_porte.clone(),
        opcao_pelo_simples: record.opcao_pelo_simples,
        data_opcao_pelo_simples: record.data_opcao_pelo_simples.clone(),
        data_exclusao_do_simples: record.data_exclusao_do_simples.clone(),
        opcao_pelo_mei: record.opcao_pelo_mei,
        situacao_especial: record.situacao_especial.clone(),
        data_situacao_especial: record.data_situacao_especial.clone(),
    }
}
