use serde::{Deserialize, Serialize};

use crate::generation::ShaderStringBuilder;

/// Anything that can render itself as a complete pass-state directive.
pub trait ToShaderString {
    fn to_shader_string(&self) -> String;
}

/// Stencil buffer configuration. Every field is an optional ShaderLab token
/// (or property reference such as `[_StencilRef]`); absent fields are not
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StencilDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_mask: Option<String>,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_fail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_fail_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_fail_back: Option<String>,
}

impl StencilDescriptor {
    /// Fields in emission order, paired with their ShaderLab keyword.
    fn entries(&self) -> [(&'static str, Option<&str>); 15] {
        [
            ("WriteMask", self.write_mask.as_deref()),
            ("ReadMask", self.read_mask.as_deref()),
            ("Ref", self.reference.as_deref()),
            ("Comp", self.comp.as_deref()),
            ("Pass", self.pass.as_deref()),
            ("Fail", self.fail.as_deref()),
            ("ZFail", self.z_fail.as_deref()),
            ("CompFront", self.comp_front.as_deref()),
            ("PassFront", self.pass_front.as_deref()),
            ("FailFront", self.fail_front.as_deref()),
            ("ZFailFront", self.z_fail_front.as_deref()),
            ("CompBack", self.comp_back.as_deref()),
            ("PassBack", self.pass_back.as_deref()),
            ("FailBack", self.fail_back.as_deref()),
            ("ZFailBack", self.z_fail_back.as_deref()),
        ]
    }
}

impl ToShaderString for StencilDescriptor {
    fn to_shader_string(&self) -> String {
        let mut builder = ShaderStringBuilder::default();
        builder.append_line("Stencil");
        builder.block(|b| {
            for (keyword, value) in self.entries() {
                if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                    b.append_line(&format!("{keyword} {v}"));
                }
            }
        });
        builder.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_present_fields_in_keyword_order() {
        let stencil = StencilDescriptor {
            reference: Some("2".to_string()),
            write_mask: Some("3".to_string()),
            comp: Some("Always".to_string()),
            pass: Some("Replace".to_string()),
            ..Default::default()
        };
        assert_eq!(
            stencil.to_shader_string(),
            "Stencil\n{\n    WriteMask 3\n    Ref 2\n    Comp Always\n    Pass Replace\n}"
        );
    }

    #[test]
    fn empty_descriptor_writes_an_empty_block() {
        assert_eq!(
            StencilDescriptor::default().to_shader_string(),
            "Stencil\n{\n}"
        );
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let stencil: StencilDescriptor = serde_json::from_value(serde_json::json!({
            "ref": "[_StencilRef]",
            "compBack": "NotEqual",
            "zFailFront": "Keep",
        }))
        .unwrap();
        assert_eq!(stencil.reference.as_deref(), Some("[_StencilRef]"));
        assert_eq!(stencil.comp_back.as_deref(), Some("NotEqual"));
        assert_eq!(stencil.z_fail_front.as_deref(), Some("Keep"));
    }
}
