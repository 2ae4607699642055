//! Structural validation of registry responses
//!
//! The registry response shape is pinned by a declarative field table:
//! name, JSON kind, nullability and optionality per field, including the
//! two nested collections. Validation walks the raw JSON value and collects
//! every mismatch instead of stopping at the first, so a failed lookup
//! reports the complete list of violations for its identifier.

use serde_json::Value;
use std::fmt;

/// JSON kind a field is required to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Number => write!(f, "number"),
            FieldKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Expected shape of one field in the response
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Field may hold `null`
    pub nullable: bool,
    /// Field may be absent entirely
    pub optional: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            optional: false,
        }
    }

    const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            optional: false,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            optional: true,
        }
    }

    const fn optional_nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            optional: true,
        }
    }
}

use FieldKind::{Boolean, Number, String as Str};

/// Scalar fields of the registry record, in export order
pub const SCALAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("cnpj", Str),
    FieldSpec::required("identificador_matriz_filial", Number),
    FieldSpec::optional("descricao_matriz_filial", Str),
    FieldSpec::required("razao_social", Str),
    FieldSpec::required("nome_fantasia", Str),
    FieldSpec::required("situacao_cadastral", Number),
    FieldSpec::optional("descricao_situacao_cadastral", Str),
    FieldSpec::nullable("data_situacao_cadastral", Str),
    FieldSpec::required("motivo_situacao_cadastral", Number),
    FieldSpec::optional_nullable("nome_cidade_exterior", Str),
    FieldSpec::required("codigo_natureza_juridica", Number),
    FieldSpec::required("data_inicio_atividade", Str),
    FieldSpec::required("cnae_fiscal", Number),
    FieldSpec::required("cnae_fiscal_descricao", Str),
    FieldSpec::optional("descricao_tipo_logradouro", Str),
    FieldSpec::required("logradouro", Str),
    FieldSpec::required("numero", Str),
    FieldSpec::required("complemento", Str),
    FieldSpec::required("bairro", Str),
    FieldSpec::required("cep", Str),
    FieldSpec::required("uf", Str),
    FieldSpec::required("codigo_municipio", Number),
    FieldSpec::required("municipio", Str),
    FieldSpec::required("ddd_telefone_1", Str),
    FieldSpec::nullable("ddd_telefone_2", Str),
    FieldSpec::nullable("ddd_fax", Str),
    FieldSpec::required("qualificacao_do_responsavel", Number),
    FieldSpec::required("capital_social", Number),
    FieldSpec::required("porte", Str),
    FieldSpec::required("descricao_porte", Str),
    FieldSpec::nullable("opcao_pelo_simples", Boolean),
    FieldSpec::nullable("data_opcao_pelo_simples", Str),
    FieldSpec::nullable("data_exclusao_do_simples", Str),
    FieldSpec::nullable("opcao_pelo_mei", Boolean),
    FieldSpec::nullable("situacao_especial", Str),
    FieldSpec::nullable("data_situacao_especial", Str),
];

/// Item fields of the `cnaes_secundarios` collection
pub const SECONDARY_ACTIVITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("codigo", Number),
    FieldSpec::required("descricao", Str),
];

/// Item fields of the `qsa` partner collection
pub const PARTNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("identificador_de_socio", Number),
    FieldSpec::required("nome_socio", Str),
    FieldSpec::required("cnpj_cpf_do_socio", Str),
    FieldSpec::required("codigo_qualificacao_socio", Number),
    FieldSpec::optional("percentual_capital_social", Number),
    FieldSpec::required("data_entrada_sociedade", Str),
    FieldSpec::nullable("cpf_representante_legal", Str),
    FieldSpec::nullable("nome_representante_legal", Str),
    FieldSpec::nullable("codigo_qualificacao_representante_legal", Number),
];

/// One schema violation at a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field, e.g. `qsa[2].nome_socio`
    pub field: String,
    /// What was expected and what was found
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a raw response body against the registry record schema
///
/// Returns every violation found; an empty list means the value is safe to
/// deserialize into [`crate::app::models::RegistryRecord`].
pub fn validate(value: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    let Some(object) = value.as_object() else {
        violations.push(Violation::new(
            "$",
            format!("expected object, found {}", kind_name(value)),
        ));
        return violations;
    };

    for spec in SCALAR_FIELDS {
        check_field(object, spec, "", &mut violations);
    }

    check_collection(object, "cnaes_secundarios", SECONDARY_ACTIVITY_FIELDS, &mut violations);
    check_collection(object, "qsa", PARTNER_FIELDS, &mut violations);

    violations
}

fn check_field(
    object: &serde_json::Map<String, Value>,
    spec: &FieldSpec,
    prefix: &str,
    violations: &mut Vec<Violation>,
) {
    let path = if prefix.is_empty() {
        spec.name.to_string()
    } else {
        format!("{prefix}.{}", spec.name)
    };

    match object.get(spec.name) {
        None => {
            if !spec.optional {
                violations.push(Violation::new(path, "required field is missing"));
            }
        }
        Some(Value::Null) => {
            if !spec.nullable {
                violations.push(Violation::new(
                    path,
                    format!("expected {}, found null", spec.kind),
                ));
            }
        }
        Some(value) => {
            if !matches_kind(value, spec.kind) {
                violations.push(Violation::new(
                    path,
                    format!("expected {}, found {}", spec.kind, kind_name(value)),
                ));
            }
        }
    }
}

fn check_collection(
    object: &serde_json::Map<String, Value>,
    name: &str,
    item_fields: &[FieldSpec],
    violations: &mut Vec<Violation>,
) {
    match object.get(name) {
        None => violations.push(Violation::new(name, "required field is missing")),
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                let path = format!("{name}[{index}]");
                let Some(item_object) = item.as_object() else {
                    violations.push(Violation::new(
                        path,
                        format!("expected object, found {}", kind_name(item)),
                    ));
                    continue;
                };
                for spec in item_fields {
                    check_field(item_object, spec, &path, violations);
                }
            }
        }
        Some(value) => violations.push(Violation::new(
            name,
            format!("expected array, found {}", kind_name(value)),
        )),
    }
}

fn matches_kind(value: &Value, kind: FieldKind) -> bool {
    match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
