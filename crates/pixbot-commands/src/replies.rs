// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing texts, in Portuguese.
//!
//! Functions that mention a command take the configured prefix `p`.

use pixbot_core::{KeyType, StoredKey};
use pixbot_pix::Amount;

pub const NOT_PERMITTED: &str = "Você não tem permissão para usar este bot.";
pub const ADMIN_ONLY_ADD: &str = "Apenas administradores podem adicionar cargos permitidos.";
pub const ADMIN_ONLY_REMOVE: &str = "Apenas administradores podem remover cargos permitidos.";
pub const ADMIN_ONLY_LIST: &str = "Apenas administradores podem ver todas as chaves Pix.";
pub const ADMIN_ONLY_LOG: &str = "Apenas administradores podem configurar o canal de logs.";

pub const ASK_KEY_TYPE: &str =
    "Qual o tipo da sua chave Pix? Responda com: cpf, celular, email, aleatoria ou cnpj.";
pub const INVALID_KEY_TYPE: &str =
    "Tipo inválido. Responda com: cpf, celular, email, aleatoria ou cnpj.";

pub const OTHER_HAS_NO_KEY: &str = "Este usuário ainda não registrou uma chave Pix.";
pub const NO_KEY_TO_DELETE: &str = "Você não possui uma chave Pix registrada.";
pub const KEY_DELETED: &str = "Sua chave Pix foi removida com sucesso!";
pub const NO_KEYS: &str = "Nenhuma chave Pix registrada no servidor.";
pub const QR_ERROR: &str = "Erro ao gerar QR Code.";

fn upper(key_type: KeyType) -> String {
    key_type.label().to_uppercase()
}

fn capitalized(key_type: KeyType) -> String {
    let label = key_type.label();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn mention_role_to_add(p: &str) -> String {
    format!("Mencione o cargo que deseja permitir. Ex: {p}pixadd @cargo")
}

pub fn role_added(name: &str) -> String {
    format!("Cargo {name} adicionado à lista de permissões do bot!")
}

pub fn role_already_allowed(name: &str) -> String {
    format!("O cargo {name} já está na lista de permissões.")
}

pub fn mention_role_to_remove(p: &str) -> String {
    format!("Mencione o cargo que deseja remover. Ex: {p}pixrem @cargo")
}

pub fn role_removed(name: &str) -> String {
    format!("Cargo {name} removido da lista de permissões do bot!")
}

pub fn role_not_allowed(name: &str) -> String {
    format!("O cargo {name} não está na lista de permissões.")
}

pub fn ask_key(declared: KeyType) -> String {
    format!("Agora envie sua chave Pix do tipo {}:", upper(declared))
}

pub fn key_mismatch(declared: KeyType, p: &str) -> String {
    format!(
        "A chave informada não corresponde ao tipo {}. Tente novamente ou digite {p}pixreg para recomeçar.",
        upper(declared)
    )
}

pub fn key_registered(key_type: KeyType) -> String {
    format!(
        "Sua chave Pix ({}) foi registrada com sucesso!",
        upper(key_type)
    )
}

pub fn no_key_yet(p: &str) -> String {
    format!(
        "Você ainda não registrou sua chave Pix. Use `{p}pixreg` antes.\nExemplo de chave Pix: chave@exemplo.com"
    )
}

pub fn own_key(key_type: KeyType, value: &str) -> String {
    format!("Chave Pix ({}): {value}", capitalized(key_type))
}

pub fn invalid_amount(p: &str) -> String {
    format!("Valor inválido. Use: `{p}pix valor` para gerar um QR Code")
}

pub fn own_qr_generated(amount: Amount, value: &str, key_type: KeyType, payload: &str) -> String {
    format!(
        "QR Code Pix para R${amount} gerado com sucesso!\nChave Pix: {value}\nTipo de chave: {key_type}\n\nCopia e Cola:\n{payload}"
    )
}

pub fn mention_user_to_view(p: &str) -> String {
    format!("Marque o usuário para ver a chave Pix dele. Ex: `{p}pixver @usuario`")
}

pub fn other_key(key_type: KeyType, mention: &str, value: &str) -> String {
    format!("Chave Pix ({key_type}) de {mention}: {value}")
}

pub fn qrcode_usage(p: &str) -> String {
    format!("Use: {p}pixqrcode @usuario valor")
}

pub fn other_qr_generated(
    amount: Amount,
    mention: &str,
    key_type: KeyType,
    value: &str,
) -> String {
    format!(
        "QR Code Pix para R${amount} de {mention} gerado com sucesso!\nChave Pix ({key_type}): {value}"
    )
}

pub fn copy_missing_amount(p: &str) -> String {
    format!("Informe o valor. Ex: {p}pixcopy 10.50")
}

pub fn copy_invalid_amount(p: &str) -> String {
    format!("Valor inválido. Use: {p}pixcopy <valor>")
}

pub fn copy_paste(amount: Amount, payload: &str) -> String {
    format!("Copia e Cola Pix para R${amount}:\n\n{payload}")
}

pub fn key_list(keys: &[StoredKey]) -> String {
    let mut out = String::from("Chaves Pix registradas:\n");
    for key in keys {
        let owner = match key.username.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("ID: {}", key.user_id),
        };
        out.push_str(&format!(
            "- {owner}: {} ({})\n",
            key.record.value, key.record.key_type
        ));
    }
    out
}

pub fn mention_log_channel(p: &str) -> String {
    format!("Mencione o canal de texto para logs. Ex: {p}pixlog #canal")
}

pub fn log_channel_set(mention: &str) -> String {
    format!("Canal de logs definido para: {mention}")
}

pub fn log_qr(requester: &str, owner: &str, amount: Amount) -> String {
    format!("[Pix] {requester} gerou um QR Code de R${amount} para a chave de {owner}.")
}

pub fn log_copy_paste(requester: &str, amount: Amount) -> String {
    format!("[Pix] {requester} gerou um Copia e Cola de R${amount}.")
}

pub fn command_list(p: &str) -> String {
    [
        "pixadd @cargo",
        "pixrem @cargo",
        "pixreg <chave>",
        "pix",
        "pix <valor>",
        "pixver @usuario",
        "pixqrcode @usuario <valor>",
        "pixdel",
        "pixlist",
        "pixcopy <valor>",
        "pixinfo",
        "pixhelp",
        "pixlog #canal",
    ]
    .iter()
    .map(|c| format!("{p}{c}"))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn info(p: &str) -> String {
    format!(
        "Bot Pix para Discord. Permite registrar, consultar e gerar QR Code Pix. Use {p}pixcmd para ver todos os comandos."
    )
}

pub fn help(p: &str) -> String {
    let lines = [
        ("pixadd @cargo", "Adiciona permissão para um cargo usar o bot"),
        ("pixrem @cargo", "Remove permissão de um cargo"),
        ("pixreg", "Registra sua chave Pix passo a passo"),
        ("pixreg <chave>", "Registra sua chave Pix diretamente"),
        ("pix", "Mostra sua chave Pix"),
        ("pix <valor>", "Gera QR Code Pix para o valor"),
        ("pixver @usuario", "Mostra a chave Pix de outro usuário"),
        ("pixqrcode @usuario <valor>", "Gera QR Code Pix de outro usuário"),
        ("pixdel", "Remove sua chave Pix"),
        ("pixlist", "Lista todas as chaves Pix (admin)"),
        ("pixcopy <valor>", "Envia o código Copia e Cola do Pix"),
        ("pixinfo", "Informações sobre o bot"),
        ("pixhelp", "Explica cada comando"),
        ("pixcmd", "Lista todos os comandos"),
        ("pixlog #canal", "Configura o canal de logs (admin)"),
    ];
    let mut out = String::from("**Comandos disponíveis:**\n");
    for (usage, what) in lines {
        out.push_str(&format!("{p}{usage}: {what}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixbot_core::PixKeyRecord;

    #[test]
    fn own_key_capitalizes_label() {
        assert_eq!(
            own_key(KeyType::Email, "a@b.co"),
            "Chave Pix (Email): a@b.co"
        );
        assert_eq!(
            own_key(KeyType::NationalIndividualId, "12345678901"),
            "Chave Pix (Cpf): 12345678901"
        );
    }

    #[test]
    fn type_prompts_use_uppercase_label() {
        assert_eq!(ask_key(KeyType::Phone), "Agora envie sua chave Pix do tipo CELULAR:");
        assert!(key_registered(KeyType::RandomToken).contains("(ALEATORIA)"));
    }

    #[test]
    fn texts_follow_prefix() {
        assert!(help("?").contains("?pixqrcode @usuario <valor>"));
        assert!(command_list("?").starts_with("?pixadd"));
        assert!(no_key_yet("?").contains("`?pixreg`"));
    }

    #[test]
    fn key_list_falls_back_to_id() {
        let keys = vec![
            StoredKey {
                user_id: "1".into(),
                username: Some("ana".into()),
                record: PixKeyRecord {
                    value: "a@b.co".into(),
                    key_type: KeyType::Email,
                },
            },
            StoredKey {
                user_id: "2".into(),
                username: None,
                record: PixKeyRecord {
                    value: "12345678901".into(),
                    key_type: KeyType::NationalIndividualId,
                },
            },
        ];
        let text = key_list(&keys);
        assert!(text.contains("- ana: a@b.co (email)"));
        assert!(text.contains("- ID: 2: 12345678901 (cpf)"));
    }

    #[test]
    fn amounts_render_with_two_decimals() {
        let text = copy_paste(Amount::from_cents(1050), "000201");
        assert!(text.starts_with("Copia e Cola Pix para R$10.50:"));
    }
}
