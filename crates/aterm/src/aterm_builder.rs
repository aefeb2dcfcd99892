#![forbid(unsafe_code)]

use std::convert::Infallible;
use std::fmt;

use smallvec::SmallVec;

use termite_utilities::debug_trace;

use crate::ATerm;
use crate::ATermData;
use crate::Symbol;
use crate::TermPool;

/// This can be used to construct an [ATerm] from a given input of (inductive) type I
/// without using recursion, as such avoiding system stack overflows. See [TermBuilder::evaluate]
/// for more details.
pub struct TermBuilder<I, C> {
    /// The results, where None is a placeholder for a result that is not yet known.
    terms: Vec<Option<ATerm>>,
    configs: Vec<Config<I, C>>,
}

/// How a term is rebuilt from its rewritten arguments by [apply].
#[derive(Debug)]
enum Constructor {
    Application(Symbol),
    List,
}

/// Applies the given function to every subterm of the given term, top down.
///
/// When `function(subterm)` returns `Some(x)` the subterm is replaced by `x`,
/// otherwise the subterm is rebuilt from its rewritten arguments. The elements
/// of a list are visited, the list cells themselves are passed to the function
/// as well.
pub fn apply<F>(pool: &TermPool, term: &ATerm, function: &F) -> ATerm
where
    F: Fn(&TermPool, &ATerm) -> Option<ATerm>,
{
    let mut builder = TermBuilder::<ATerm, Constructor>::new();

    let result = builder.evaluate(
        pool,
        term.clone(),
        |pool, args, term| -> Result<Yield<Constructor>, Infallible> {
            if let Some(result) = function(pool, &term) {
                return Ok(Yield::Term(result));
            }

            match term.data() {
                ATermData::Int(_) | ATermData::EmptyList => Ok(Yield::Term(term)),
                ATermData::List { head, tail } => {
                    args.push(head);
                    args.push(tail);
                    Ok(Yield::Construct(Constructor::List))
                }
                ATermData::Application { symbol, arguments } => {
                    for argument in arguments {
                        args.push(argument);
                    }
                    Ok(Yield::Construct(Constructor::Application(symbol)))
                }
            }
        },
        |pool, constructor, arguments| match constructor {
            Constructor::Application(symbol) => Ok(pool.create_term(&symbol, arguments)),
            Constructor::List => Ok(pool.create_list(&arguments[0], &arguments[1])),
        },
    );

    match result {
        Ok(term) => term,
        Err(never) => match never {},
    }
}

impl<I: fmt::Debug, C: fmt::Debug> TermBuilder<I, C> {
    pub fn new() -> TermBuilder<I, C> {
        TermBuilder {
            terms: Vec::new(),
            configs: Vec::new(),
        }
    }

    /// This can be used to construct a term from a given input of (inductive)
    /// type I, without using the system stack, i.e. recursion.
    ///
    /// The `transformer` function is applied to every instance I. It either
    /// yields a result term directly, or it pushes more inputs onto the
    /// argument stack and yields an instance C. In the latter case `construct`
    /// is called with that instance and the results of the pushed inputs, in
    /// the order in which they were pushed.
    ///
    /// # Example
    ///
    /// For [apply] the input I is a term and C is its head symbol. The
    /// transformer pushes the arguments of the term when the rewrite function
    /// does not replace it, and `construct` applies the head symbol to the
    /// rewritten arguments.
    pub fn evaluate<F, G, E>(&mut self, pool: &TermPool, input: I, transformer: F, construct: G) -> Result<ATerm, E>
    where
        F: Fn(&TermPool, &mut ArgStack<I, C>, I) -> Result<Yield<C>, E>,
        G: Fn(&TermPool, C, &[ATerm]) -> Result<ATerm, E>,
    {
        debug_trace!("Transforming {:?}", input);
        self.terms.push(None);
        self.configs.push(Config::Apply(input, 0));

        while let Some(config) = self.configs.pop() {
            match config {
                Config::Apply(input, result) => {
                    let top_of_stack = self.configs.len();
                    let mut args = ArgStack::new(&mut self.terms, &mut self.configs);

                    match transformer(pool, &mut args, input)? {
                        Yield::Construct(constructor) => {
                            // The construction must happen after all the pushed inputs have been evaluated.
                            let arity = args.len();
                            self.configs
                                .insert(top_of_stack, Config::Construct(constructor, arity, result));
                        }
                        Yield::Term(term) => {
                            self.terms[result] = Some(term);
                        }
                    }
                }
                Config::Construct(constructor, arity, result) => {
                    let first = self.terms.len() - arity;
                    let arguments: SmallVec<[ATerm; 8]> = self.terms.drain(first..).flatten().collect();
                    debug_assert_eq!(arguments.len(), arity, "All arguments should have been evaluated");

                    self.terms[result] = Some(construct(pool, constructor, &arguments)?);
                }
            }

            debug_trace!("{:?}", self);
        }

        debug_assert!(self.terms.len() == 1, "Expect exactly one term on the result stack");
        Ok(self
            .terms
            .pop()
            .flatten()
            .expect("The input has been evaluated to exactly one term"))
    }
}

impl<I: fmt::Debug, C: fmt::Debug> Default for TermBuilder<I, C> {
    fn default() -> Self {
        Self::new()
    }
}

enum Config<I, C> {
    /// Apply the transformer to the input and store the outcome at the given position.
    Apply(I, usize),
    /// Construct the term from the given number of results on top of the stack.
    Construct(C, usize, usize),
}

/// The outcome of the transformer in [TermBuilder::evaluate].
pub enum Yield<C> {
    /// Yield this term as is.
    Term(ATerm),
    /// Yield the term constructed from C and the results of the pushed inputs.
    Construct(C),
}

/// The inputs that are pushed by a single application of the transformer.
pub struct ArgStack<'a, I, C> {
    terms: &'a mut Vec<Option<ATerm>>,
    configs: &'a mut Vec<Config<I, C>>,
    top_of_stack: usize,
}

impl<'a, I, C> ArgStack<'a, I, C> {
    fn new(terms: &'a mut Vec<Option<ATerm>>, configs: &'a mut Vec<Config<I, C>>) -> ArgStack<'a, I, C> {
        let top_of_stack = terms.len();
        ArgStack {
            terms,
            configs,
            top_of_stack,
        }
    }

    /// Returns the number of inputs that were pushed.
    fn len(&self) -> usize {
        self.terms.len() - self.top_of_stack
    }

    /// Pushes an input whose result becomes the next argument of the construction.
    pub fn push(&mut self, input: I) {
        self.configs.push(Config::Apply(input, self.terms.len()));
        self.terms.push(None);
    }
}

impl<I: fmt::Debug, C: fmt::Debug> fmt::Debug for TermBuilder<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Terms: [")?;
        for (i, term) in self.terms.iter().enumerate() {
            writeln!(f, "{i}\t{term:?}")?;
        }
        writeln!(f, "]")?;

        writeln!(f, "Configs: [")?;
        for config in &self.configs {
            writeln!(f, "\t{config:?}")?;
        }
        write!(f, "]")
    }
}

impl<I: fmt::Debug, C: fmt::Debug> fmt::Debug for Config<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Config::Apply(input, result) => write!(f, "Apply({input:?}, {result})"),
            Config::Construct(constructor, arity, result) => {
                write!(f, "Construct({constructor:?}, {arity}, {result})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use termite_utilities::random_test;
    use termite_utilities::test_logger;

    use crate::random_mixed_term;

    use super::*;

    fn rename_a(pool: &TermPool, term: &ATerm) -> Option<ATerm> {
        if term.is_application() && term.arity() == 0 && term.get_head_symbol().name() == "a" {
            Some(pool.create_constant(&pool.create_symbol("b", 0)))
        } else {
            None
        }
    }

    #[test]
    fn test_apply() {
        test_logger();
        let pool = TermPool::new();

        let term = pool.from_string("f(a,[a,g(a)],1,c)").unwrap();
        let result = apply(&pool, &term, &rename_a);
        assert_eq!(result, pool.from_string("f(b,[b,g(b)],1,c)").unwrap());
    }

    #[test]
    fn test_apply_identity() {
        random_test(100, |rng| {
            let pool = TermPool::new();
            let term = random_mixed_term(rng, &pool, 5);

            assert_eq!(apply(&pool, &term, &|_, _| None), term);
        });
    }

    #[test]
    fn test_apply_replaces_outermost() {
        let pool = TermPool::new();

        let term = pool.from_string("f(g(a),h(g(a)))").unwrap();
        let replaced = apply(&pool, &term, &|pool: &TermPool, term: &ATerm| {
            (term.is_application() && term.get_head_symbol().name() == "g").then(|| pool.create_int(0))
        });
        assert_eq!(replaced, pool.from_string("f(0,h(0))").unwrap());
    }

    #[test]
    fn test_apply_deep_term() {
        let pool = TermPool::new();
        let f = pool.create_symbol("f", 1);

        let mut term = pool.create_constant(&pool.create_symbol("a", 0));
        for _ in 0..100_000 {
            term = pool.create_term(&f, &[term]);
        }

        let result = apply(&pool, &term, &rename_a);
        assert_eq!(result.arity(), 1);
        assert_eq!(result.iter().last().unwrap().get_head_symbol().name(), "b");
    }
}
