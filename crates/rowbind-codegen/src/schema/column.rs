#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) ignore: bool,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }
}

mod kw {
    syn::custom_keyword!(ignore);
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = Self {
            name: None,
            ignore: false,
        };

        // Allowed syntax:
        //
        // #[column("name")]
        // #[column(ignore)]
        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(syn::LitStr) {
                if result.name.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column name"));
                }
                let name: syn::LitStr = input.parse()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new(name.span(), "column name must not be empty"));
                }
                result.name = Some(name);
            } else if lookahead.peek(kw::ignore) {
                let _kw: kw::ignore = input.parse()?;
                result.ignore = true;
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        if result.ignore && result.name.is_some() {
            return Err(syn::Error::new(
                input.span(),
                "an ignored field cannot have a column name",
            ));
        }

        Ok(result)
    }
}
