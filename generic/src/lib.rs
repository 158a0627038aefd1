/*
 * Copyright (2024) Volcengine
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
extern crate proc_macro;

use proc_macro::TokenStream;

use quote::quote;
use syn::parse_macro_input;
use syn::DeriveInput;

/// Accessors for inputs that target an existing file through its `blob` field.
#[proc_macro_derive(BlobSetter)]
pub fn derive_blob_getter_setter(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, .. } = parse_macro_input!(input);
    let output = quote! {
        impl #ident{
            pub fn blob(&self) -> &crate::blob::Blob {
                &self.blob
            }
            pub fn set_blob(&mut self, blob: impl Into<crate::blob::Blob>) {
                self.blob = blob.into();
            }
        }

        impl crate::internal::BlobTarget for #ident{
            fn blob(&self) -> &crate::blob::Blob {
                &self.blob
            }
        }
    };
    output.into()
}

/// Accessors for the optional `security` field and the query/form hook that emits it.
#[proc_macro_derive(SecurityQuery, attributes(use_inner))]
pub fn derive_security_query(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, attrs, .. } = parse_macro_input!(input);
    let mut self_ptr = quote! {self};
    for attr in attrs.iter() {
        if attr.path().is_ident("use_inner") {
            self_ptr = quote! {self.inner};
        }
    }

    let output = quote! {
        impl #ident{
            pub fn security(&self) -> &Option<crate::security::Security> {
                &#self_ptr.security
            }
            pub fn set_security(&mut self, security: impl Into<crate::security::Security>) {
                #self_ptr.security = Some(security.into());
            }
            pub fn clear_security(&mut self) {
                #self_ptr.security = None;
            }
        }

        impl crate::internal::SecurityQuery for #ident{
            fn security(&self) -> &Option<crate::security::Security> {
                &#self_ptr.security
            }
        }
    };
    output.into()
}

#[proc_macro_derive(RequestInfo)]
pub fn derive_request_info(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, .. } = parse_macro_input!(input);

    let output = quote! {
        impl #ident{
            pub fn status_code(&self) -> isize {
                self.request_info.status_code
            }

            pub fn header(&self) -> &std::collections::HashMap<String, String> {
                &self.request_info.header
            }

            pub fn request_info(&self) -> &crate::common::RequestInfo {
                &self.request_info
            }
        }

        impl crate::common::RequestInfoTrait for #ident{
            fn status_code(&self) -> isize {
                self.request_info.status_code
            }

            fn header(&self) -> &std::collections::HashMap<String, String> {
                &self.request_info.header
            }
        }
    };
    output.into()
}

#[proc_macro_derive(FromRefAndDisplay)]
pub fn derive_from_ref(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, .. } = parse_macro_input!(input);
    let output = quote! {
         impl std::fmt::Display for #ident{
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
         }

         impl From<&#ident> for #ident{
            fn from(value: &#ident) -> Self {
                value.to_owned()
            }
         }

    };
    output.into()
}
