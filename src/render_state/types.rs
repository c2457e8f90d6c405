use std::{fmt, str::FromStr};

use anyhow::{Error, Result, bail};
use serde::{Deserialize, Serialize};

/// Which pipeline-state aspect a directive configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderStateKind {
    Cull,
    Blend,
    BlendOp,
    DepthTest,
    DepthWrite,
    ColorMask,
    ClipBehavior,
    Stencil,
}

impl fmt::Display for RenderStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn normalize_token(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', '-'], "")
}

/// Defines a closed token enum whose `Display` is the ShaderLab spelling and
/// whose `FromStr` accepts that spelling plus the listed aliases.
macro_rules! state_token {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $token:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn token(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let t = normalize_token(s);
                $(
                    if t == normalize_token($token) $(|| t == $alias)* {
                        return Ok($name::$variant);
                    }
                )+
                bail!("unsupported {} value: {}", $label, s.trim())
            }
        }
    };
}

state_token! {
    /// Face culling mode.
    Cull, "cull" {
        Off => "Off" | "none",
        Front => "Front",
        Back => "Back",
    }
}

state_token! {
    /// Blend factor.
    Blend, "blend factor" {
        One => "One",
        Zero => "Zero",
        SrcColor => "SrcColor",
        SrcAlpha => "SrcAlpha",
        DstColor => "DstColor",
        DstAlpha => "DstAlpha",
        OneMinusSrcColor => "OneMinusSrcColor",
        OneMinusSrcAlpha => "OneMinusSrcAlpha",
        OneMinusDstColor => "OneMinusDstColor",
        OneMinusDstAlpha => "OneMinusDstAlpha",
    }
}

state_token! {
    /// Blend equation.
    BlendOp, "blend operation" {
        Add => "Add",
        Sub => "Sub" | "subtract",
        RevSub => "RevSub" | "reversesubtract" | "revsubtract",
        Min => "Min",
        Max => "Max",
    }
}

state_token! {
    /// Depth comparison function.
    ZTest, "depth test" {
        Less => "Less",
        Greater => "Greater",
        LEqual => "LEqual" | "lessequal",
        GEqual => "GEqual" | "greaterequal",
        Equal => "Equal",
        NotEqual => "NotEqual",
        Always => "Always",
    }
}

state_token! {
    /// Depth write toggle.
    ZWrite, "depth write" {
        On => "On" | "true",
        Off => "Off" | "false",
    }
}

/// A directive argument: either a closed enumerated token or an open string
/// that is emitted verbatim (e.g. a `[_CullMode]` material property reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirectiveValue<E> {
    Enumerated(E),
    Raw(String),
}

impl<E: fmt::Display> fmt::Display for DirectiveValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Enumerated(e) => e.fmt(f),
            DirectiveValue::Raw(s) => f.write_str(s),
        }
    }
}

impl<E> DirectiveValue<E>
where
    E: FromStr,
{
    /// Resolves `token` to the enumerated value when it names one, otherwise
    /// keeps it as a raw string.
    pub fn parse_lenient(token: &str) -> Self {
        match token.parse::<E>() {
            Ok(e) => DirectiveValue::Enumerated(e),
            Err(_) => {
                log::debug!("passing render state token through verbatim: {token}");
                DirectiveValue::Raw(token.to_string())
            }
        }
    }
}

macro_rules! directive_value_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for DirectiveValue<$ty> {
                fn from(v: $ty) -> Self {
                    DirectiveValue::Enumerated(v)
                }
            }
        )+
    };
}

directive_value_from!(Cull, Blend, BlendOp, ZTest, ZWrite);

impl<E> From<&str> for DirectiveValue<E> {
    fn from(s: &str) -> Self {
        DirectiveValue::Raw(s.to_string())
    }
}

impl<E> From<String> for DirectiveValue<E> {
    fn from(s: String) -> Self {
        DirectiveValue::Raw(s)
    }
}

impl<E> From<&String> for DirectiveValue<E> {
    fn from(s: &String) -> Self {
        DirectiveValue::Raw(s.clone())
    }
}
