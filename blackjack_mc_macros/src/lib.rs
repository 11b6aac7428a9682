use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{self, Ident};

/// This macro is added before a method of `Round` struct in the impl block.
/// Use this macro to first check if current game phase is exactly the phase in
/// the attribute.
///
/// For example, `#[allowed_phase(PlayerTurn)]` will make a method first check
/// if current game phase is `PlayerTurn`. If not, the method will return a
/// `SimulationError::PhaseViolation` naming the method and both phases.
///
/// The annotated method must return `Result<_, SimulationError>`, and both
/// `GamePhase` and `SimulationError` must be in scope at the call site.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let mut ast: syn::ImplItemFn = match syn::parse(item) {
        Ok(ast) => ast,
        Err(err) => return err.to_compile_error().into(),
    };
    let phase: Ident = match syn::parse(attr) {
        Ok(phase) => phase,
        Err(err) => return err.to_compile_error().into(),
    };

    let method_name = ast.sig.ident.to_string();
    let early_return: syn::Stmt = syn::parse2(phase_guard(&phase, &method_name))
        .expect("phase guard should always be a valid statement");
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}

fn phase_guard(phase: &Ident, method_name: &str) -> TokenStream2 {
    quote! {
        if self.current_game_phase != GamePhase::#phase {
            return Err(SimulationError::PhaseViolation {
                method: #method_name,
                expected: GamePhase::#phase,
                actual: self.current_game_phase,
            });
        }
    }
}
